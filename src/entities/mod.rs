//! Relational mirror of the Books collections. Every top-level document is
//! keyed by the identifier the Books API assigned it and carries the owning
//! local user.

pub mod address;
pub mod contact;
pub mod contact_contact_person;
pub mod contact_person;
pub mod credit_note;
pub mod credit_note_contact_person;
pub mod default_templates;
pub mod expense;
pub mod invoice;
pub mod sales_order;
pub mod sales_order_contact_person;
pub mod sales_order_custom_field;
pub mod sales_order_line_item;
pub mod sales_order_sub_status;
