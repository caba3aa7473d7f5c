use crate::analysis;
use crate::domain::Condition;
use crate::error::ApiError;
use axum::{extract::Path, Json};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ConditionInfo {
    // ---
    pub name: &'static str,
    pub about: &'static str,
}

/// GET /conditions/{name}
///
/// Reference text for one of the recognised conditions; the name is matched
/// case-insensitively.
pub async fn get_condition(Path(name): Path<String>) -> Result<Json<ConditionInfo>, ApiError> {
    // ---
    let condition = Condition::parse(&name)
        .ok_or_else(|| ApiError::NotFound(format!("Unknown condition: {name}")))?;

    Ok(Json(ConditionInfo {
        name: condition.display_name(),
        about: analysis::about(condition),
    }))
}
