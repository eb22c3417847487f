//! Expense API endpoints.

use api_types::Message;
use api_types::expense::{
    ExpenseListQuery, ExpenseListResponse, ExpenseNew, ExpenseUpdate, ExpenseView,
};
use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
};

use crate::{
    ServerError,
    server::{AuthUser, ServerState},
};
use engine::MoneyCents;

pub(crate) fn map_category(category: api_types::Category) -> engine::Category {
    match category {
        api_types::Category::Food => engine::Category::Food,
        api_types::Category::Transportation => engine::Category::Transportation,
        api_types::Category::Entertainment => engine::Category::Entertainment,
        api_types::Category::Bills => engine::Category::Bills,
        api_types::Category::Shopping => engine::Category::Shopping,
        api_types::Category::Healthcare => engine::Category::Healthcare,
        api_types::Category::Education => engine::Category::Education,
        api_types::Category::Other => engine::Category::Other,
    }
}

pub(crate) fn view_category(category: engine::Category) -> api_types::Category {
    match category {
        engine::Category::Food => api_types::Category::Food,
        engine::Category::Transportation => api_types::Category::Transportation,
        engine::Category::Entertainment => api_types::Category::Entertainment,
        engine::Category::Bills => api_types::Category::Bills,
        engine::Category::Shopping => api_types::Category::Shopping,
        engine::Category::Healthcare => api_types::Category::Healthcare,
        engine::Category::Education => api_types::Category::Education,
        engine::Category::Other => api_types::Category::Other,
    }
}

fn expense_view(expense: engine::Expense) -> ExpenseView {
    ExpenseView {
        id: expense.id,
        user_id: expense.user_id,
        amount_cents: expense.amount.cents(),
        category: view_category(expense.category),
        date: expense.date,
        description: expense.description,
        created_at: expense.created_at,
        updated_at: expense.updated_at,
    }
}

pub async fn list(
    Extension(AuthUser(user)): Extension<AuthUser>,
    State(state): State<ServerState>,
    Query(query): Query<ExpenseListQuery>,
) -> Json<ExpenseListResponse> {
    let filter = engine::ExpenseFilter {
        category: query.category.map(map_category),
        start_date: query.start_date,
        end_date: query.end_date,
    };
    let page = state
        .engine
        .list_expenses(
            user.id,
            &filter,
            query.page.unwrap_or(1),
            query.limit.unwrap_or(10),
        )
        .await;

    Json(ExpenseListResponse {
        expenses: page.items.into_iter().map(expense_view).collect(),
        total_pages: page.total_pages,
        current_page: page.current_page,
        total_count: page.total_count,
    })
}

pub async fn create(
    Extension(AuthUser(user)): Extension<AuthUser>,
    State(state): State<ServerState>,
    Json(payload): Json<ExpenseNew>,
) -> Result<(StatusCode, Json<ExpenseView>), ServerError> {
    let expense = state
        .engine
        .add_expense(
            user.id,
            MoneyCents::new(payload.amount_cents),
            map_category(payload.category),
            payload.date,
            &payload.description,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(expense_view(expense))))
}

pub async fn get(
    Extension(AuthUser(user)): Extension<AuthUser>,
    State(state): State<ServerState>,
    Path(id): Path<u64>,
) -> Result<Json<ExpenseView>, ServerError> {
    let expense = state.engine.expense(id, user.id).await?;
    Ok(Json(expense_view(expense)))
}

pub async fn update(
    Extension(AuthUser(user)): Extension<AuthUser>,
    State(state): State<ServerState>,
    Path(id): Path<u64>,
    Json(payload): Json<ExpenseUpdate>,
) -> Result<Json<ExpenseView>, ServerError> {
    let changes = engine::ExpenseChanges {
        amount: payload.amount_cents.map(MoneyCents::new),
        category: payload.category.map(map_category),
        date: payload.date,
        description: payload.description,
    };
    let expense = state.engine.update_expense(id, user.id, changes).await?;
    Ok(Json(expense_view(expense)))
}

pub async fn remove(
    Extension(AuthUser(user)): Extension<AuthUser>,
    State(state): State<ServerState>,
    Path(id): Path<u64>,
) -> Result<Json<Message>, ServerError> {
    state.engine.delete_expense(id, user.id).await?;
    Ok(Json(Message {
        message: "Expense deleted successfully".to_string(),
    }))
}
