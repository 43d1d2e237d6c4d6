//! # Role Authorizer
//!
//! A fixed capability table keyed by [`Role`]. Every mutation and every
//! report goes through [`RoleAuthorizer::require`] before touching a store.
//!
//! | capability | worker | caterer | admin |
//! |---|---|---|---|
//! | view all orders | no (own only) | yes | yes |
//! | see prices | yes | no | yes |
//! | edit order status | no | yes | yes |
//! | delete order | no | no | yes |
//! | manage meal catalog | no | yes | no |
//! | place order | yes | no | yes |
//! | analytics | none | caterer report | admin report |

use serde::{Deserialize, Serialize};
use std::fmt::Display;

use crate::error::CanteenError;
use crate::model::{Role, User};

/// Which report an analytics request is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReportKind {
    CatererReport,
    AdminReport,
}

/// An action the table answers for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    ViewAllOrders,
    SeePrices,
    EditStatus,
    DeleteOrder,
    ManageMealCatalog,
    PlaceOrder,
    ViewAnalytics(ReportKind),
}

impl Display for Capability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Capability::ViewAllOrders => f.write_str("view all orders"),
            Capability::SeePrices => f.write_str("see prices"),
            Capability::EditStatus => f.write_str("edit order status"),
            Capability::DeleteOrder => f.write_str("delete orders"),
            Capability::ManageMealCatalog => f.write_str("manage the meal catalog"),
            Capability::PlaceOrder => f.write_str("place orders"),
            Capability::ViewAnalytics(ReportKind::CatererReport) => {
                f.write_str("view the caterer report")
            }
            Capability::ViewAnalytics(ReportKind::AdminReport) => {
                f.write_str("view the admin report")
            }
        }
    }
}

struct Grants {
    view_all_orders: bool,
    see_prices: bool,
    edit_status: bool,
    delete_order: bool,
    manage_meal_catalog: bool,
    place_order: bool,
    analytics: Option<ReportKind>,
}

const WORKER: Grants = Grants {
    view_all_orders: false,
    see_prices: true,
    edit_status: false,
    delete_order: false,
    manage_meal_catalog: false,
    place_order: true,
    analytics: None,
};

const CATERER: Grants = Grants {
    view_all_orders: true,
    see_prices: false,
    edit_status: true,
    delete_order: false,
    manage_meal_catalog: true,
    place_order: false,
    analytics: Some(ReportKind::CatererReport),
};

const ADMIN: Grants = Grants {
    view_all_orders: true,
    see_prices: true,
    edit_status: true,
    delete_order: true,
    manage_meal_catalog: false,
    place_order: true,
    analytics: Some(ReportKind::AdminReport),
};

/// Answers capability queries for a role. Stateless.
#[derive(Debug, Clone, Copy, Default)]
pub struct RoleAuthorizer;

impl RoleAuthorizer {
    fn grants(role: Role) -> &'static Grants {
        match role {
            Role::Worker => &WORKER,
            Role::Caterer => &CATERER,
            Role::Admin => &ADMIN,
        }
    }

    pub fn can_view_all_orders(role: Role) -> bool {
        Self::grants(role).view_all_orders
    }

    pub fn can_see_prices(role: Role) -> bool {
        Self::grants(role).see_prices
    }

    pub fn can_edit_status(role: Role) -> bool {
        Self::grants(role).edit_status
    }

    pub fn can_delete_order(role: Role) -> bool {
        Self::grants(role).delete_order
    }

    pub fn can_manage_meal_catalog(role: Role) -> bool {
        Self::grants(role).manage_meal_catalog
    }

    pub fn can_place_order(role: Role) -> bool {
        Self::grants(role).place_order
    }

    /// Each role sees at most one report.
    pub fn can_view_analytics(role: Role, kind: ReportKind) -> bool {
        Self::grants(role).analytics == Some(kind)
    }

    pub fn allows(role: Role, capability: Capability) -> bool {
        match capability {
            Capability::ViewAllOrders => Self::can_view_all_orders(role),
            Capability::SeePrices => Self::can_see_prices(role),
            Capability::EditStatus => Self::can_edit_status(role),
            Capability::DeleteOrder => Self::can_delete_order(role),
            Capability::ManageMealCatalog => Self::can_manage_meal_catalog(role),
            Capability::PlaceOrder => Self::can_place_order(role),
            Capability::ViewAnalytics(kind) => Self::can_view_analytics(role, kind),
        }
    }

    /// Fails with [`CanteenError::Authorization`] unless `actor` holds `capability`.
    pub fn require(actor: &User, capability: Capability) -> Result<(), CanteenError> {
        if Self::allows(actor.role, capability) {
            Ok(())
        } else {
            tracing::warn!(user_id = %actor.id, role = %actor.role, %capability, "Denied");
            Err(CanteenError::authorization(format!(
                "role {} may not {capability}",
                actor.role
            )))
        }
    }
}
