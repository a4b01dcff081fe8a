//! crates/praktika_core/src/navigation.rs
//!
//! Pure role-to-navigation resolution.
//!
//! Each role's menu is a fixed data table; adding a role is a single table
//! edit. Nothing here touches the session or the router.

use crate::domain::{NavigationItem, Role};

/// Route shown to anyone who is not signed in.
pub const HOME_ROUTE: &str = "/";

/// Where unauthenticated visitors are sent by the access guard.
pub const SIGN_IN_ROUTE: &str = "/signin";

struct MenuEntry {
    label: &'static str,
    route: &'static str,
}

const STUDENT_MENU: &[MenuEntry] = &[
    MenuEntry { label: "Internships", route: "/internships" },
    MenuEntry { label: "My Applications", route: "/student-applications" },
    MenuEntry { label: "Profile", route: "/profile" },
    MenuEntry { label: "Settings", route: "/student-settings" },
];

const ORGANIZATION_MENU: &[MenuEntry] = &[
    MenuEntry { label: "Post Internships", route: "/organization-internships" },
    MenuEntry { label: "Applications", route: "/organization-applications" },
    MenuEntry { label: "Analytics", route: "/organization-analytics" },
    MenuEntry { label: "Settings", route: "/organization-settings" },
];

const UNIVERSITY_MENU: &[MenuEntry] = &[
    MenuEntry { label: "Students", route: "/university-students" },
    MenuEntry { label: "Supervisors", route: "/university-supervisors" },
    MenuEntry { label: "Reports", route: "/university-reports" },
    MenuEntry { label: "Settings", route: "/university-settings" },
];

const ADMIN_MENU: &[MenuEntry] = &[
    MenuEntry { label: "Users", route: "/admin-users" },
    MenuEntry { label: "Organizations", route: "/admin-organizations" },
    MenuEntry { label: "Universities", route: "/admin-universities" },
    MenuEntry { label: "Analytics", route: "/admin-analytics" },
    MenuEntry { label: "Settings", route: "/admin-settings" },
];

/// The dashboard landing route for a role.
pub const fn dashboard_route(role: Role) -> &'static str {
    match role {
        Role::Student => "/student-dashboard",
        Role::Organization => "/organization-dashboard",
        Role::University => "/university-dashboard",
        Role::Admin => "/admin-dashboard",
    }
}

const fn menu_for(role: Role) -> &'static [MenuEntry] {
    match role {
        Role::Student => STUDENT_MENU,
        Role::Organization => ORGANIZATION_MENU,
        Role::University => UNIVERSITY_MENU,
        Role::Admin => ADMIN_MENU,
    }
}

/// Resolves the ordered menu for a role.
///
/// `None` (unauthenticated, or a role string that failed to parse) yields
/// only the Home entry. For any role the first entry is its dashboard.
/// `is_current` is set by exact string comparison with `active_route`;
/// `/internships` is current on `/internships` but not on `/internships/42`.
pub fn resolve(role: Option<Role>, active_route: &str) -> Vec<NavigationItem> {
    let Some(role) = role else {
        return vec![NavigationItem {
            label: "Home",
            route: HOME_ROUTE,
            is_current: active_route == HOME_ROUTE,
        }];
    };

    let dashboard = dashboard_route(role);
    let mut items = vec![NavigationItem {
        label: "Dashboard",
        route: dashboard,
        is_current: active_route == dashboard,
    }];
    items.extend(menu_for(role).iter().map(|entry| NavigationItem {
        label: entry.label,
        route: entry.route,
        is_current: active_route == entry.route,
    }));
    items
}
