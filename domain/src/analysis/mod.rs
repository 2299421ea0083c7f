//! Analysis domain.
//!
//! - [`ambition::AmbitionLevel`]: how aggressive the requested analysis should be
//! - [`request::AnalysisRequest`]: validated dataset + scope + ambition
//! - [`result::AnalysisResult`]: the structured report returned by the service
//! - [`schema::AnalysisSchema`]: the response-shape contract, declared and enforced

pub mod ambition;
pub mod request;
pub mod result;
pub mod schema;
