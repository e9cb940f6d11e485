use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Вкладка формы процесса, на которую переводится фокус при ошибке
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FormTab {
    General,
    Purpose,
    Processing,
}

impl FormTab {
    pub const ALL: [FormTab; 3] = [FormTab::General, FormTab::Purpose, FormTab::Processing];

    pub fn title(&self) -> &'static str {
        match self {
            FormTab::General => "Общие сведения",
            FormTab::Purpose => "Цели и основания",
            FormTab::Processing => "Обработка",
        }
    }
}

/// Ошибки проверки обязательных полей формы (до отправки на сервер)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Укажите название процесса")]
    MissingName,
    #[error("Укажите основание обработки ПДн")]
    MissingLegalBasis,
    #[error("При выборе \"Иное\" необходимо указать альтернативное основание")]
    MissingLegalBasisOther,
}

impl ValidationError {
    /// Вкладка, которую нужно показать пользователю
    pub fn tab(&self) -> FormTab {
        match self {
            ValidationError::MissingName => FormTab::General,
            ValidationError::MissingLegalBasis | ValidationError::MissingLegalBasisOther => {
                FormTab::Purpose
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConsoleError {
    /// Сетевая ошибка или ответ сервера с неуспешным статусом
    #[error("{message}")]
    Network { status: Option<u16>, message: String },

    #[error("Процесс не найден")]
    NotFound(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Некорректный ответ сервера: {0}")]
    Decode(String),
}

impl ConsoleError {
    pub fn network(message: impl Into<String>) -> Self {
        ConsoleError::Network {
            status: None,
            message: message.into(),
        }
    }

    pub fn http(status: u16, message: impl Into<String>) -> Self {
        ConsoleError::Network {
            status: Some(status),
            message: message.into(),
        }
    }
}

pub type ConsoleResult<T> = Result<T, ConsoleError>;
