use crate::session::User;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Dashboard,
    Distribute,
    Admin,
}

impl Route {
    pub fn path(self) -> &'static str {
        match self {
            Route::Dashboard => "/",
            Route::Distribute => "/distribute",
            Route::Admin => "/admin",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Route::Dashboard => "Dashboard",
            Route::Distribute => "Distribute",
            Route::Admin => "Admin Panel",
        }
    }

    /// Map a path to a route. Unknown paths, and the admin panel for
    /// non-admins, fall back to the dashboard.
    pub fn resolve(path: &str, user: &User) -> Route {
        let path = path.trim_end_matches('/');
        match path {
            "/distribute" => Route::Distribute,
            "/admin" if user.is_admin() => Route::Admin,
            _ => Route::Dashboard,
        }
    }
}

/// Sidebar entries visible to `role`, in display order
pub fn nav_items(user: &User) -> Vec<Route> {
    let mut items = vec![Route::Dashboard, Route::Distribute];
    if user.is_admin() {
        items.push(Route::Admin);
    }
    items
}

/// Letter shown in the sidebar avatar
pub fn avatar_initial(user: Option<&User>) -> char {
    user.and_then(|u| u.stage_name.chars().next())
        .and_then(|c| c.to_uppercase().next())
        .unwrap_or('A')
}
