//! Sidebar navigation derived from the current location and Safe state.
//!
//! The item table is immutable; every render derives a fresh list.

use crate::domain::ImplementationVersionState;

pub mod routes {
    pub const HOME: &str = "/home";
    pub const BALANCES: &str = "/balances";
    pub const TRANSACTIONS_HISTORY: &str = "/transactions/history";
    pub const TRANSACTIONS_QUEUE: &str = "/transactions/queue";
    pub const ADDRESS_BOOK: &str = "/address-book";
    pub const APPS: &str = "/apps";
    pub const SETTINGS_SETUP: &str = "/settings/setup";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavIcon {
    Home,
    Assets,
    Transactions,
    AddressBook,
    Apps,
    Settings,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavItem {
    pub href: &'static str,
    pub label: &'static str,
    pub icon: NavIcon,
}

pub const NAV_ITEMS: &[NavItem] = &[
    NavItem {
        href: routes::HOME,
        label: "Home",
        icon: NavIcon::Home,
    },
    NavItem {
        href: routes::BALANCES,
        label: "Assets",
        icon: NavIcon::Assets,
    },
    NavItem {
        href: routes::TRANSACTIONS_HISTORY,
        label: "Transactions",
        icon: NavIcon::Transactions,
    },
    NavItem {
        href: routes::ADDRESS_BOOK,
        label: "Address book",
        icon: NavIcon::AddressBook,
    },
    NavItem {
        href: routes::APPS,
        label: "Apps",
        icon: NavIcon::Apps,
    },
    NavItem {
        href: routes::SETTINGS_SETUP,
        label: "Settings",
        icon: NavIcon::Settings,
    },
];

#[derive(Debug, Clone, Default)]
pub struct NavContext {
    pub pathname: String,
    /// Value of the `safe` query parameter, carried onto every link.
    pub safe_query: Option<String>,
    pub has_queued_txs: bool,
    pub has_recovery_queue: bool,
    pub version_state: ImplementationVersionState,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedNavItem {
    pub item: NavItem,
    pub href: String,
    pub selected: bool,
    pub badge: bool,
}

/// First path segment, without slashes: `/transactions/queue` -> `transactions`.
pub fn subdirectory(path: &str) -> &str {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    path.trim_start_matches('/')
        .split('/')
        .next()
        .unwrap_or_default()
}

/// Target of an item once the queue rewrite is applied.
pub fn resolve_route(item: &NavItem, ctx: &NavContext) -> &'static str {
    if item.href == routes::TRANSACTIONS_HISTORY && (ctx.has_queued_txs || ctx.has_recovery_queue)
    {
        routes::TRANSACTIONS_QUEUE
    } else {
        item.href
    }
}

pub fn derive_navigation(items: &[NavItem], ctx: &NavContext) -> Vec<RenderedNavItem> {
    let current = subdirectory(&ctx.pathname);
    items
        .iter()
        .map(|item| {
            let route = resolve_route(item, ctx);
            let href = match ctx.safe_query.as_deref() {
                Some(safe) if !safe.is_empty() => format!("{route}?safe={safe}"),
                _ => route.to_owned(),
            };
            RenderedNavItem {
                item: *item,
                href,
                selected: !current.is_empty() && subdirectory(item.href) == current,
                badge: item.href == routes::SETTINGS_SETUP
                    && ctx.version_state == ImplementationVersionState::Outdated,
            }
        })
        .collect()
}
