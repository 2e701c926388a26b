pub use super::orderdesk_order::Entity as OrderdeskOrder;
pub use super::orderdesk_user::Entity as OrderdeskUser;
