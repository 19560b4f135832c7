use crate::{
    dto::users::{UserDirectory, UserSummary},
    error::AppResult,
    models::User,
    response::{ApiResponse, Meta},
    routes::params::UserListQuery,
    session::Session,
    state::AppState,
};

/// Case-insensitive substring search over first name, username and the
/// telegram id rendered as a string.
pub fn search_users(users: Vec<User>, search: Option<&str>) -> Vec<User> {
    let Some(needle) = search.map(str::to_lowercase).filter(|s| !s.is_empty()) else {
        return users;
    };
    users
        .into_iter()
        .filter(|user| {
            user.first_name.to_lowercase().contains(&needle)
                || user
                    .username
                    .as_deref()
                    .is_some_and(|name| name.to_lowercase().contains(&needle))
                || user.telegram_id.to_string().contains(&needle)
        })
        .collect()
}

/// Full-table reduce over the fetched set. If the backend ever paginates
/// `/users/`, these become totals of the fetched page only.
pub fn summarize(users: &[User]) -> UserSummary {
    let total_orders = users.iter().map(|user| user.total_orders).sum();
    let total_spent: f64 = users.iter().map(|user| user.total_spent).sum();
    UserSummary {
        total_users: users.len() as i64,
        total_orders,
        total_spent,
        total_spent_display: format!("${total_spent:.2}"),
    }
}

pub async fn list_users(
    state: &AppState,
    session: &Session,
    query: UserListQuery,
) -> AppResult<ApiResponse<UserDirectory>> {
    let users = state.client.list_users(&session.backend_token).await?;
    let total = users.len();
    // The summary reduces the unfiltered set; typing in the search box must
    // not change the totals.
    let summary = summarize(&users);
    let items = search_users(users, query.search.as_deref());
    let meta = Meta::counts(items.len(), total);
    Ok(ApiResponse::success(
        "Users",
        UserDirectory { items, summary },
        Some(meta),
    ))
}

pub async fn get_user(
    state: &AppState,
    session: &Session,
    id: &str,
) -> AppResult<ApiResponse<User>> {
    let user = state.client.get_user(&session.backend_token, id).await?;
    Ok(ApiResponse::success("User", user, None))
}

/// Toggle the block flag via the backend, then refetch the directory.
pub async fn toggle_block(
    state: &AppState,
    session: &Session,
    id: &str,
) -> AppResult<ApiResponse<UserDirectory>> {
    let _permit = state.guard.begin(format!("user:{id}"))?;

    state
        .client
        .toggle_user_block(&session.backend_token, id)
        .await?;
    tracing::info!(admin = %session.username, user_id = %id, "user block toggled");

    let users = state.client.list_users(&session.backend_token).await?;
    let summary = summarize(&users);
    let meta = Meta::counts(users.len(), users.len());
    Ok(ApiResponse::success(
        "User updated",
        UserDirectory {
            items: users,
            summary,
        },
        Some(meta),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn user(first: &str, username: Option<&str>, telegram_id: i64, spent: f64, orders: i64) -> User {
        User {
            id: format!("u-{telegram_id}"),
            telegram_id,
            username: username.map(str::to_string),
            first_name: first.to_string(),
            last_name: None,
            total_orders: orders,
            total_spent: spent,
            is_blocked: false,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn search_matches_name_username_and_telegram_id() {
        let users = vec![
            user("Sara", Some("sara_h"), 111222333, 10.0, 2),
            user("Omar", None, 444555666, 0.0, 0),
        ];

        assert_eq!(search_users(users.clone(), Some("SARA")).len(), 1);
        assert_eq!(search_users(users.clone(), Some("sara_h")).len(), 1);
        assert_eq!(search_users(users.clone(), Some("44455")).len(), 1);
        assert_eq!(search_users(users.clone(), Some("")).len(), 2);
        assert_eq!(search_users(users, Some("zzz")).len(), 0);
    }

    #[test]
    fn summary_sums_the_loaded_set_and_formats_spend() {
        let users = vec![
            user("Sara", None, 1, 10.5, 3),
            user("Omar", None, 2, 4.25, 1),
            user("Ali", None, 3, 0.0, 0),
        ];
        let summary = summarize(&users);

        assert_eq!(summary.total_users, 3);
        assert_eq!(summary.total_orders, 4);
        assert_eq!(summary.total_spent_display, "$14.75");
    }

    #[test]
    fn summary_of_nobody_is_zero_dollars() {
        let summary = summarize(&[]);
        assert_eq!(summary.total_users, 0);
        assert_eq!(summary.total_spent_display, "$0.00");
    }
}
