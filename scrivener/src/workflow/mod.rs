//! Fixed multi-agent workflows.
//!
//! An [`Orchestrator`] owns one agent per role and runs them in one of three
//! fixed sequences:
//!
//! | Workflow | Steps | Model calls |
//! |---|---|---|
//! | simple | `research`, `fact_check`, `write` | 3 |
//! | iterative | `initial_research`, `fact_check`, `refined_research`, `final_fact_check`, `write` | 5 |
//! | comparative | `research_perspective_{i}`..., `cross_check`, `overall_fact_check`, `write_comparison` | N + 3 |
//!
//! Every completed step is appended to an [`AuditLog`], and the finished
//! [`WorkflowResult`] carries a copy of it as `workflow_history`.

mod audit;
mod orchestrator;
mod request;
mod result;

pub use audit::{AuditLog, AuditRecord};
pub use orchestrator::{
    Orchestrator, PERSPECTIVE_SEPARATOR, combine_perspectives, perspective_context,
    refinement_context,
};
pub use request::{ArticleRequest, ComparativeRequest, IterativeRequest, SimpleRequest};
pub use result::{WorkflowResult, WorkflowType};
