//! Use cases (application services)

pub mod gather_suggestions;
pub mod precheck_action;
pub mod review_proposal;

#[cfg(test)]
pub(crate) mod test_support;
