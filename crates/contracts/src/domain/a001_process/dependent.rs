//! Зависимые поля формы: микроцель от цели, "Иное" основание

use super::fields::{
    ProcessField, LEGAL_BASIS_OTHER_LABEL, LEGAL_BASIS_OTHER_VALUE, MICRO_PURPOSE_PARENT_FIELD,
};
use super::form::ProcessFormDto;
use crate::shared::record::field_str;
use crate::shared::reference::{item_option, ReferenceBook, SelectOption};

fn reference_of(field: ProcessField) -> &'static str {
    field.reference().unwrap_or_default()
}

/// Допустимые микроцели для выбранной цели.
///
/// Микроцель хранит только наименование родительской цели, поэтому фильтр
/// идёт по тексту наименования, а не по id.
pub fn micro_purpose_options(book: &ReferenceBook, purpose_id: &str) -> Vec<SelectOption> {
    let micro_ref = reference_of(ProcessField::MicroPurpose);
    let items = book.items(micro_ref);

    if purpose_id.is_empty() {
        return items.iter().filter_map(item_option).collect();
    }

    let Some(purpose_text) = book.resolve_label(reference_of(ProcessField::Purpose), purpose_id)
    else {
        return Vec::new();
    };

    items
        .iter()
        .filter(|item| field_str(item, MICRO_PURPOSE_PARENT_FIELD) == purpose_text)
        .filter_map(item_option)
        .collect()
}

/// Пересчёт вариантов микроцели после смены цели. Выбранная микроцель
/// сохраняется, только если осталась среди вариантов.
pub fn on_purpose_changed(book: &ReferenceBook, form: &mut ProcessFormDto) -> Vec<SelectOption> {
    let options = micro_purpose_options(book, &form.purpose);
    if !options.iter().any(|o| o.value == form.micro_purpose) {
        form.micro_purpose.clear();
    }
    options
}

/// Смена основания: "Иное" открывает текстовое поле, любое другое значение
/// скрывает и очищает его
pub fn on_legal_basis_changed(form: &mut ProcessFormDto, value: &str) {
    form.legal_basis = value.to_string();
    if value != LEGAL_BASIS_OTHER_VALUE {
        form.legal_basis_other.clear();
    }
}

/// Видимость поля "Иное основание"
pub fn legal_basis_other_visible(form: &ProcessFormDto) -> bool {
    form.is_legal_basis_other()
}

/// Варианты основания обработки, "Иное" в конце списка
pub fn legal_basis_options(book: &ReferenceBook) -> Vec<SelectOption> {
    let mut options = book.options(reference_of(ProcessField::LegalBasis));
    options.push(SelectOption::new(
        LEGAL_BASIS_OTHER_VALUE,
        LEGAL_BASIS_OTHER_LABEL,
    ));
    options
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::record::Record;

    fn rec(text: &str) -> Record {
        serde_json::from_str(text).unwrap()
    }

    fn book() -> ReferenceBook {
        let mut book = ReferenceBook::new();
        book.insert(
            "Цель обработки ПДн",
            vec![
                rec(r#"{"Цель обработки ПДнID": "1", "Цель обработки ПДн": "Target"}"#),
                rec(r#"{"Цель обработки ПДнID": "2", "Цель обработки ПДн": "Other"}"#),
            ],
        );
        book.insert(
            "Микроцель обработки ПДн",
            vec![
                rec(r#"{"Микроцель обработки ПДнID": "11", "Микроцель обработки ПДн": "Расчёт", "Цель обработки ПДн": "Target"}"#),
                rec(r#"{"Микроцель обработки ПДнID": "12", "Микроцель обработки ПДн": "Отчётность", "Цель обработки ПДн": "Other"}"#),
            ],
        );
        book.insert(
            "Основание обработки ПДн",
            vec![rec(r#"{"Основание обработки ПДнID": "41", "Основание обработки ПДн": "Договор"}"#)],
        );
        book
    }

    #[test]
    fn test_purpose_filters_by_label() {
        let options = micro_purpose_options(&book(), "1");
        assert_eq!(options, vec![SelectOption::new("11", "Расчёт")]);
    }

    #[test]
    fn test_no_purpose_offers_all() {
        assert_eq!(micro_purpose_options(&book(), "").len(), 2);
    }

    #[test]
    fn test_unknown_purpose_offers_none() {
        assert!(micro_purpose_options(&book(), "99").is_empty());
    }

    #[test]
    fn test_selection_kept_only_if_still_offered() {
        let book = book();
        let mut form = ProcessFormDto {
            purpose: "1".into(),
            micro_purpose: "11".into(),
            ..Default::default()
        };
        on_purpose_changed(&book, &mut form);
        assert_eq!(form.micro_purpose, "11");

        form.purpose = "2".into();
        let options = on_purpose_changed(&book, &mut form);
        assert_eq!(options, vec![SelectOption::new("12", "Отчётность")]);
        assert!(form.micro_purpose.is_empty());
    }

    #[test]
    fn test_legal_basis_toggle() {
        let mut form = ProcessFormDto {
            legal_basis_other: "Текст".into(),
            ..Default::default()
        };

        on_legal_basis_changed(&mut form, LEGAL_BASIS_OTHER_VALUE);
        assert!(legal_basis_other_visible(&form));
        assert_eq!(form.legal_basis_other, "Текст");

        on_legal_basis_changed(&mut form, "41");
        assert!(!legal_basis_other_visible(&form));
        assert!(form.legal_basis_other.is_empty());
    }

    #[test]
    fn test_legal_basis_options_end_with_other() {
        let options = legal_basis_options(&book());
        assert_eq!(options.len(), 2);
        assert_eq!(options[1].value, LEGAL_BASIS_OTHER_VALUE);
        assert_eq!(options[1].label, "Иное");
    }
}
