//! Error shared by the use-case services.

use crate::storage::local_store::StoreError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug)]
pub enum ServiceError {
    /// Title is blank after trim.
    BlankTitle,
    /// Profile name is blank after trim.
    BlankName,
    /// Profile email does not look like `local@domain.tld`.
    InvalidEmail(String),
    Store(StoreError),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankTitle => write!(f, "title must not be blank"),
            Self::BlankName => write!(f, "profile name must not be blank"),
            Self::InvalidEmail(value) => write!(f, "invalid email: `{value}`"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            _ => None,
        }
    }
}

impl From<StoreError> for ServiceError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

pub(crate) fn normalize_title(title: String) -> ServiceResult<String> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(ServiceError::BlankTitle);
    }
    if trimmed.len() == title.len() {
        return Ok(title);
    }
    Ok(trimmed.to_string())
}
