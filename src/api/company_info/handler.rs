//! Company Info API Handlers

use axum::{Json, extract::State};

use crate::auth::AdminUser;
use crate::core::ServerState;
use crate::db::models::{CompanyInfo, CompanyInfoUpdate};
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_NOTE_LEN, MAX_SHORT_TEXT_LEN, validate_non_negative, validate_optional_text,
};
use crate::utils::{AppResponse, AppResult, ok};

const RESOURCE: &str = "company_info";

/// Get current company info (public — the storefront needs it)
pub async fn get(State(state): State<ServerState>) -> AppResult<Json<AppResponse<CompanyInfo>>> {
    Ok(ok(state.company_info.get_or_create().await?))
}

/// Update company info (admin, shallow merge onto the singleton)
pub async fn update(
    State(state): State<ServerState>,
    admin: AdminUser,
    Json(partial): Json<CompanyInfoUpdate>,
) -> AppResult<Json<AppResponse<CompanyInfo>>> {
    validate_optional_text(&partial.company_name, "companyName", MAX_NAME_LEN)?;
    validate_optional_text(&partial.tagline, "tagline", MAX_NOTE_LEN)?;
    validate_optional_text(&partial.phone, "phone", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(&partial.upi_id, "upiId", MAX_SHORT_TEXT_LEN)?;
    if let Some(days) = partial.min_advance_booking_days {
        validate_non_negative(days, "minAdvanceBookingDays")?;
    }

    let info = state.company_info.update(partial).await?;
    state
        .audit
        .log(
            "update",
            RESOURCE,
            "company_info:main",
            Some(admin.subject),
            serde_json::json!({ "companyName": &info.company_name }),
        )
        .await;
    Ok(ok(info))
}
