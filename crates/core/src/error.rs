use thiserror::Error;

use crate::catalog::CatalogError;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}
