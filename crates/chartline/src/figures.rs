//! Figures shipped with the crate.

/// Applicant tracking system workflow: from job posting through screening,
/// AI scoring and interviews to hire, rejection or the talent pool, with
/// every outcome feeding the audit log.
pub const ATS_WORKFLOW: &str = include_str!("../figures/ats_workflow.toml");
