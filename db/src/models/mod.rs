pub mod submission;

pub use submission::Entity as Submission;
