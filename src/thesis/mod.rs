pub mod schema;
pub mod stage;
pub mod tags;
pub mod validation;

pub use schema::FundThesis;
pub use stage::{FundingStage, StageFilter};
pub use tags::ThesisTag;
pub use validation::validate_thesis;
