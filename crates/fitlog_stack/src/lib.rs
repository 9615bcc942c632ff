//! Declarative resource topology for the FitLog deployment.
//!
//! The stack is modelled as typed resource declarations wired together by
//! logical id and rendered to a CloudFormation template. Nothing here talks to
//! AWS; the rendered template is handed to CloudFormation by the operator.

pub mod assets;
pub mod config;
pub mod intrinsics;
pub mod resources;
pub mod template;
pub mod topology;

pub use config::{Architecture, CodeLocation, StackConfig, StackConfigError};
pub use template::Template;
pub use topology::build_fitlog_stack;
