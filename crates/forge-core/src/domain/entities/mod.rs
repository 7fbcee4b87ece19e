pub mod descriptor;
pub mod layout;
pub mod report;
pub mod variables;

pub use crate::domain::DomainError;
pub use descriptor::ProjectDescriptor;
pub use layout::{RenderJob, WorkspaceLayout};
pub use report::BuildReport;
pub use variables::{Var, VariableStore};
