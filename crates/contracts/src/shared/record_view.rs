//! Отображение записей без схемы: выбор таблицы или карточек по числу колонок
//! и построение модели представления ячеек.

use super::record::{is_id_key, value_to_string, Record};
use serde_json::Value;

/// Максимальное число колонок, при котором записи выводятся таблицей
pub const MAX_TABLE_COLUMNS: usize = 3;

/// Метка колонки-флага
pub const BOOLEAN_MARKER: &str = "да/нет";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayMode {
    Table,
    Cards,
}

/// Колонки и режим, определённые по первой записи выборки
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordLayout {
    pub mode: DisplayMode,
    pub columns: Vec<String>,
}

/// Определяет раскладку по первой записи; `None` для пустой выборки
pub fn infer_layout(records: &[Record]) -> Option<RecordLayout> {
    let first = records.first()?;
    let columns: Vec<String> = first.keys().filter(|k| !is_id_key(k)).cloned().collect();
    let mode = if columns.len() <= MAX_TABLE_COLUMNS {
        DisplayMode::Table
    } else {
        DisplayMode::Cards
    };
    Some(RecordLayout { mode, columns })
}

pub fn is_boolean_column(label: &str) -> bool {
    label.contains(BOOLEAN_MARKER)
}

/// Отмечен ли флаг: `true`, "1", "yes", "true" (точное совпадение)
pub fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => matches!(s.as_str(), "1" | "yes" | "true"),
        _ => false,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellValue {
    Text(String),
    Checkbox(bool),
}

impl CellValue {
    pub fn build(column: &str, record: &Record) -> Self {
        let value = record.get(column);
        if is_boolean_column(column) {
            CellValue::Checkbox(is_truthy(value))
        } else {
            CellValue::Text(value.map(value_to_string).unwrap_or_default())
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewCell {
    pub column: String,
    pub value: CellValue,
}

/// Строка таблицы или карточка
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewRow {
    /// Позиция записи в отфильтрованной выборке
    pub index: usize,
    pub cells: Vec<ViewCell>,
}

impl ViewRow {
    pub fn build(index: usize, record: &Record, columns: &[String]) -> Self {
        let cells = columns
            .iter()
            .map(|column| ViewCell {
                column: column.clone(),
                value: CellValue::build(column, record),
            })
            .collect();
        Self { index, cells }
    }

    /// Заголовок карточки: первая колонка
    pub fn title(&self) -> Option<&ViewCell> {
        self.cells.first()
    }

    /// Остальные поля карточки
    pub fn details(&self) -> &[ViewCell] {
        self.cells.get(1..).unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn rec(value: Value) -> Record {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_layout_table_for_three_columns() {
        let records = vec![rec(json!({
            "РискID": "1", "Риск": "Утечка", "Уровень": "Высокий", "ПроцессID": "5", "Меры": "DLP"
        }))];
        let layout = infer_layout(&records).unwrap();
        assert_eq!(layout.mode, DisplayMode::Table);
        assert_eq!(layout.columns, vec!["Риск", "Уровень", "Меры"]);
    }

    #[test]
    fn test_layout_cards_for_many_columns() {
        let records = vec![rec(json!({
            "ПДнID": "1", "Категория": "Общие", "Состав": "ФИО", "Источник": "Субъект", "Хранение": "БД"
        }))];
        let layout = infer_layout(&records).unwrap();
        assert_eq!(layout.mode, DisplayMode::Cards);
        assert_eq!(layout.columns.len(), 4);
    }

    #[test]
    fn test_layout_requires_items() {
        assert_eq!(infer_layout(&[]), None);
    }

    #[test]
    fn test_truthy_forms() {
        assert!(is_truthy(Some(&json!(true))));
        assert!(is_truthy(Some(&json!("1"))));
        assert!(is_truthy(Some(&json!("yes"))));
        assert!(is_truthy(Some(&json!("true"))));
        assert!(!is_truthy(Some(&json!("True"))));
        assert!(!is_truthy(Some(&json!("да"))));
        assert!(!is_truthy(Some(&json!(""))));
        assert!(!is_truthy(Some(&json!(1))));
        assert!(!is_truthy(None));
    }

    #[test]
    fn test_row_cells_render_checkbox_columns() {
        let record = rec(json!({"Передача": "Банк", "Трансграничная (да/нет)": "1"}));
        let columns = vec!["Передача".to_string(), "Трансграничная (да/нет)".to_string()];
        let row = ViewRow::build(0, &record, &columns);

        assert_eq!(row.cells[0].value, CellValue::Text("Банк".into()));
        assert_eq!(row.cells[1].value, CellValue::Checkbox(true));
        assert_eq!(row.title().unwrap().column, "Передача");
        assert_eq!(row.details().len(), 1);
    }
}
