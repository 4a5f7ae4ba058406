//! `SeaORM` entity definitions.

pub mod accounts;
pub mod clients;
pub mod exchange_rates;
pub mod sea_orm_active_enums;
pub mod transactions;
