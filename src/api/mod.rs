mod health;
mod slack;

pub use crate::api::health::{health_check, __path_health_check};
pub use crate::api::slack::{
    notify, notify_order, notify_payment,
    __path_notify, __path_notify_order, __path_notify_payment,
};
