//! Shop rules applied by the screens before talking to the backend

pub mod inventory;
pub mod ledger;
pub mod media;

pub use inventory::{format_precio, ProductForm, ProductPatch};
pub use ledger::{check_stock, record, TransactionForm};
pub use media::resolve_image_url;
