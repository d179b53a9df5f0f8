//! Embedded-collection mutation engine.
//!
//! Pure, in-memory operations over parent documents: ordered sub-collections
//! (`collection`), the ownership gate (`gate`), the like state machine
//! (`likes`) and profile section handling (`sections`). Nothing in here
//! touches the store; services load, call into the engine, then save.

pub mod collection;
pub mod error;
pub mod gate;
pub mod likes;
pub mod sections;

pub use collection::{Element, Embedded};
pub use error::{CoreError, CoreResult, Resource};
pub use gate::{authorize, authorize_profile, Decision, PostAction};
pub use sections::{EducationInput, ExperienceInput, ProfileInput, ProfileUpdate, SectionEntry, SectionKind};
