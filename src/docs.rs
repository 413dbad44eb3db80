// src/docs.rs

use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::OpenApi;

use crate::handlers;
use crate::models;
use crate::services::order_service::OrderView;

#[derive(OpenApi)]
#[openapi(
    info(title = "Ballas Fund Manager API"),
    paths(
        // --- Auth ---
        handlers::auth::login,
        handlers::auth::guest,
        handlers::auth::get_me,

        // --- Dashboard ---
        handlers::dashboard::get_summary,
        handlers::dashboard::health,

        // --- Members ---
        handlers::members::list_members,
        handlers::members::create_member,
        handlers::members::update_member,
        handlers::members::delete_member,

        // --- Resources ---
        handlers::resources::list_resources,
        handlers::resources::create_resource,
        handlers::resources::update_resource,
        handlers::resources::delete_resource,

        // --- Inventory ---
        handlers::inventory::list_inventory,
        handlers::inventory::current_inventory,
        handlers::inventory::record_inventory,
        handlers::inventory::update_inventory,

        // --- Tasks ---
        handlers::tasks::list_tasks,
        handlers::tasks::create_task,
        handlers::tasks::update_task,
        handlers::tasks::delete_task,

        // --- Task completions ---
        handlers::task_completions::list_completions,
        handlers::task_completions::completion_summary,
        handlers::task_completions::create_completion,
        handlers::task_completions::update_completion,
        handlers::task_completions::delete_completion,

        // --- Strikes ---
        handlers::strikes::list_strikes,
        handlers::strikes::strike_summary,
        handlers::strikes::issue_strike,
        handlers::strikes::update_strike,
        handlers::strikes::delete_strike,

        // --- Crafted items ---
        handlers::crafted_items::list_crafted_items,
        handlers::crafted_items::create_crafted_item,
        handlers::crafted_items::update_crafted_item,
        handlers::crafted_items::delete_crafted_item,

        // --- Orders ---
        handlers::orders::list_orders,
        handlers::orders::create_order,
        handlers::orders::update_order,
        handlers::orders::delete_order,
    ),
    components(
        schemas(
            // --- Auth ---
            models::auth::Role,
            models::auth::AdminUser,
            models::auth::LoginPayload,
            models::auth::LoginResponse,
            models::auth::Capabilities,
            models::auth::GuestSession,

            // --- Rows ---
            models::member::Member,
            models::resource::Resource,
            models::inventory::Inventory,
            models::task::Task,
            models::task::Recurrence,
            models::task_completion::TaskCompletion,
            models::strike::Strike,
            models::crafted_item::CraftedItem,
            models::order::Order,
            models::order::OrderStatus,
            OrderView,

            // --- Payloads ---
            models::member::NewMember,
            models::member::MemberPatch,
            models::resource::NewResource,
            models::resource::ResourcePatch,
            models::inventory::NewInventory,
            models::inventory::InventoryPatch,
            models::task::NewTask,
            models::task::TaskPatch,
            models::task_completion::NewTaskCompletion,
            models::task_completion::TaskCompletionPatch,
            models::strike::NewStrike,
            models::strike::StrikePatch,
            models::crafted_item::NewCraftedItem,
            models::crafted_item::CraftedItemPatch,
            models::order::NewOrder,
            models::order::OrderPatch,

            // --- Aggregates ---
            models::dashboard::DashboardSummary,
            models::dashboard::MemberWithStrikes,
            models::dashboard::MemberTaskHistory,
        )
    ),
    tags(
        (name = "Auth", description = "Admin sign-in and guest sessions"),
        (name = "Dashboard", description = "Headline numbers and health"),
        (name = "Members", description = "Gang roster"),
        (name = "Resources", description = "Resource catalogue"),
        (name = "Inventory", description = "Quantity snapshots per resource"),
        (name = "Tasks", description = "Recurring collection tasks"),
        (name = "Task completions", description = "Append-only completion log"),
        (name = "Strikes", description = "Disciplinary points"),
        (name = "Crafted items", description = "Crafting log"),
        (name = "Orders", description = "Customer order board")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme("api_jwt", SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_route_is_documented() {
        let doc = ApiDoc::openapi();

        for path in [
            "/api/members",
            "/api/members/{id}",
            "/api/inventory/current",
            "/api/strikes/summary",
            "/api/task-completions/summary",
            "/api/orders/{id}",
            "/api/auth/login",
        ] {
            assert!(doc.paths.paths.contains_key(path), "{path} missing from OpenAPI");
        }
    }
}
