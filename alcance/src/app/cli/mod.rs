mod alcance_app;
mod app_error;
mod batch_ops;
mod operation;
mod origin_row;

pub use alcance_app::AlcanceApp;
pub use app_error::AppError;
pub use operation::AlcanceOperation;
pub use origin_row::OriginRow;
