use super::fields::{ProcessField, CSRF_FIELD, LEGAL_BASIS_OTHER_VALUE};
use crate::shared::error::ValidationError;
use crate::shared::record::{decode_html_entities, field_str, Record};
use crate::shared::report_source::WireForm;
use serde::{Deserialize, Serialize};

/// Значения формы процесса (то, что выбрано в полях ввода)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessFormDto {
    pub name: String,
    pub status: String,
    pub group: String,
    pub parent: String,
    pub initiator: String,
    pub product: String,
    pub service: String,
    pub information_system: String,
    pub purpose: String,
    pub micro_purpose: String,
    pub subject_categories: Vec<String>,
    pub subjects_count: String,
    /// Id основания или служебное значение "Иное"
    pub legal_basis: String,
    pub legal_basis_other: String,
    pub legal_act: String,
    pub method: String,
    pub term: String,
    pub destruction: String,
}

impl ProcessFormDto {
    /// Новая форма: статус "Проект", инициатор: текущий пользователь
    pub fn for_create(draft_status_id: &str, user_id: &str) -> Self {
        Self {
            status: draft_status_id.to_string(),
            initiator: user_id.to_string(),
            ..Self::default()
        }
    }

    /// Заполнение формы из строки отчёта
    pub fn from_record(record: &Record) -> Self {
        let read = |field: ProcessField| {
            let raw = field_str(record, field.record_label());
            if field.is_free_text() {
                decode_html_entities(&raw)
            } else {
                raw
            }
        };

        let mut dto = Self::default();
        for field in ProcessField::ALL {
            dto.set_value(field, read(field));
        }

        // "Иное": заполнен только текст, id основания пуст
        if !dto.legal_basis_other.is_empty() && dto.legal_basis.is_empty() {
            dto.legal_basis = LEGAL_BASIS_OTHER_VALUE.to_string();
        } else {
            dto.legal_basis_other.clear();
        }

        dto
    }

    pub fn value(&self, field: ProcessField) -> String {
        match field {
            ProcessField::Name => self.name.clone(),
            ProcessField::Status => self.status.clone(),
            ProcessField::Group => self.group.clone(),
            ProcessField::Parent => self.parent.clone(),
            ProcessField::Initiator => self.initiator.clone(),
            ProcessField::Product => self.product.clone(),
            ProcessField::Service => self.service.clone(),
            ProcessField::InformationSystem => self.information_system.clone(),
            ProcessField::Purpose => self.purpose.clone(),
            ProcessField::MicroPurpose => self.micro_purpose.clone(),
            ProcessField::SubjectCategories => self.subject_categories.join(","),
            ProcessField::SubjectsCount => self.subjects_count.clone(),
            ProcessField::LegalBasis => self.legal_basis.clone(),
            ProcessField::LegalBasisOther => self.legal_basis_other.clone(),
            ProcessField::LegalAct => self.legal_act.clone(),
            ProcessField::Method => self.method.clone(),
            ProcessField::Term => self.term.clone(),
            ProcessField::Destruction => self.destruction.clone(),
        }
    }

    pub fn set_value(&mut self, field: ProcessField, value: String) {
        match field {
            ProcessField::Name => self.name = value,
            ProcessField::Status => self.status = value,
            ProcessField::Group => self.group = value,
            ProcessField::Parent => self.parent = value,
            ProcessField::Initiator => self.initiator = value,
            ProcessField::Product => self.product = value,
            ProcessField::Service => self.service = value,
            ProcessField::InformationSystem => self.information_system = value,
            ProcessField::Purpose => self.purpose = value,
            ProcessField::MicroPurpose => self.micro_purpose = value,
            ProcessField::SubjectCategories => {
                self.subject_categories = split_categories(&value);
            }
            ProcessField::SubjectsCount => self.subjects_count = value,
            ProcessField::LegalBasis => self.legal_basis = value,
            ProcessField::LegalBasisOther => self.legal_basis_other = value,
            ProcessField::LegalAct => self.legal_act = value,
            ProcessField::Method => self.method = value,
            ProcessField::Term => self.term = value,
            ProcessField::Destruction => self.destruction = value,
        }
    }

    pub fn is_legal_basis_other(&self) -> bool {
        self.legal_basis == LEGAL_BASIS_OTHER_VALUE
    }

    /// Проверка обязательных полей в фиксированном порядке
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::MissingName);
        }
        if self.legal_basis.is_empty() {
            return Err(ValidationError::MissingLegalBasis);
        }
        if self.is_legal_basis_other() && self.legal_basis_other.trim().is_empty() {
            return Err(ValidationError::MissingLegalBasisOther);
        }
        Ok(())
    }

    /// Тело формы для `_m_new` / `_m_save`
    pub fn to_wire(&self, xsrf: &str) -> Result<WireForm, ValidationError> {
        self.validate()?;

        let mut form = WireForm::new();
        form.set(CSRF_FIELD, xsrf);

        for field in ProcessField::ALL {
            let value = match field {
                ProcessField::Name => self.name.trim().to_string(),
                ProcessField::LegalBasis if self.is_legal_basis_other() => String::new(),
                ProcessField::LegalBasisOther if self.is_legal_basis_other() => {
                    self.legal_basis_other.trim().to_string()
                }
                ProcessField::LegalBasisOther => String::new(),
                other => self.value(other),
            };
            form.set(field.wire_key(), value);
        }

        Ok(form)
    }
}

fn split_categories(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn rec(value: serde_json::Value) -> Record {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_other_legal_basis_round_trip() {
        let record = rec(json!({
            "ПроцессID": "15",
            "Процесс": "Кадровый учёт",
            "Основание обработки ПДн": "",
            "Иное основание": "Custom text"
        }));

        let dto = ProcessFormDto::from_record(&record);
        assert!(dto.is_legal_basis_other());
        assert_eq!(dto.legal_basis_other, "Custom text");

        let wire = dto.to_wire("tok").unwrap();
        assert_eq!(wire.get("t336"), Some(""));
        assert_eq!(wire.get("t600"), Some("Custom text"));
        assert_eq!(wire.get("_xsrf"), Some("tok"));
    }

    #[test]
    fn test_reference_legal_basis_clears_other() {
        let record = rec(json!({
            "Процесс": "Учёт",
            "Основание обработки ПДн": "41",
            "Иное основание": "устаревший текст"
        }));

        let dto = ProcessFormDto::from_record(&record);
        assert_eq!(dto.legal_basis, "41");
        assert!(dto.legal_basis_other.is_empty());

        let wire = dto.to_wire("tok").unwrap();
        assert_eq!(wire.get("t336"), Some("41"));
        assert_eq!(wire.get("t600"), Some(""));
    }

    #[test]
    fn test_prefill_decodes_and_splits() {
        let record = rec(json!({
            "Процесс": "ООО &quot;Ромашка&quot;",
            "Категории субъектов ПДн": "3, 5,7",
            "Статус": 372
        }));
        let dto = ProcessFormDto::from_record(&record);
        assert_eq!(dto.name, "ООО \"Ромашка\"");
        assert_eq!(dto.subject_categories, vec!["3", "5", "7"]);
        assert_eq!(dto.status, "372");
    }

    #[test]
    fn test_validation_order() {
        let dto = ProcessFormDto::default();
        assert_eq!(dto.validate(), Err(ValidationError::MissingName));

        let dto = ProcessFormDto {
            name: "   ".into(),
            legal_basis: LEGAL_BASIS_OTHER_VALUE.into(),
            ..Default::default()
        };
        assert_eq!(dto.validate(), Err(ValidationError::MissingName));

        let dto = ProcessFormDto {
            name: "Учёт".into(),
            ..Default::default()
        };
        assert_eq!(dto.validate(), Err(ValidationError::MissingLegalBasis));

        let dto = ProcessFormDto {
            name: "Учёт".into(),
            legal_basis: LEGAL_BASIS_OTHER_VALUE.into(),
            legal_basis_other: "  ".into(),
            ..Default::default()
        };
        assert_eq!(dto.validate(), Err(ValidationError::MissingLegalBasisOther));
    }

    #[test]
    fn test_wire_joins_categories_and_trims_name() {
        let dto = ProcessFormDto {
            name: "  Учёт  ".into(),
            legal_basis: "41".into(),
            subject_categories: vec!["3".into(), "5".into()],
            ..ProcessFormDto::for_create("372", "417")
        };
        let wire = dto.to_wire("tok").unwrap();
        assert_eq!(wire.get("t294"), Some("Учёт"));
        assert_eq!(wire.get("t392"), Some("3,5"));
        assert_eq!(wire.get("t297"), Some("372"));
        assert_eq!(wire.get("t365"), Some("417"));
        assert_eq!(wire.len(), ProcessField::ALL.len() + 1);
    }
}
