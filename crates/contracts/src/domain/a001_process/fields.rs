//! Поля процесса: ключи платформы, метки в отчёте, справочники

use crate::shared::error::FormTab;

/// Идентификатор процесса в отчёте 480
pub const PROCESS_ID_FIELD: &str = "ПроцессID";
pub const PROCESS_NAME_FIELD: &str = "Процесс";
pub const CREATED_AT_FIELD: &str = "Дата создания";
pub const CREATOR_FIELD: &str = "Имя";

/// Поле CSRF-токена в теле формы
pub const CSRF_FIELD: &str = "_xsrf";

/// Служебное значение "Иное" в выборе основания обработки
pub const LEGAL_BASIS_OTHER_VALUE: &str = "__OTHER__";
pub const LEGAL_BASIS_OTHER_LABEL: &str = "Иное";

/// Поле записи микроцели, в котором хранится наименование родительской цели
pub const MICRO_PURPOSE_PARENT_FIELD: &str = "Цель обработки ПДн";

pub const PLACEHOLDER_LABEL: &str = "— Выберите —";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProcessField {
    Name,
    Status,
    Group,
    Parent,
    Initiator,
    Product,
    Service,
    InformationSystem,
    Purpose,
    MicroPurpose,
    SubjectCategories,
    SubjectsCount,
    LegalBasis,
    LegalBasisOther,
    LegalAct,
    Method,
    Term,
    Destruction,
}

impl ProcessField {
    pub const ALL: [ProcessField; 18] = [
        ProcessField::Name,
        ProcessField::Status,
        ProcessField::Group,
        ProcessField::Parent,
        ProcessField::Initiator,
        ProcessField::Product,
        ProcessField::Service,
        ProcessField::InformationSystem,
        ProcessField::Purpose,
        ProcessField::MicroPurpose,
        ProcessField::SubjectCategories,
        ProcessField::SubjectsCount,
        ProcessField::LegalBasis,
        ProcessField::LegalBasisOther,
        ProcessField::LegalAct,
        ProcessField::Method,
        ProcessField::Term,
        ProcessField::Destruction,
    ];

    /// Ключ поля в форме платформы
    pub fn wire_key(&self) -> &'static str {
        match self {
            ProcessField::Name => "t294",
            ProcessField::Status => "t297",
            ProcessField::Group => "t300",
            ProcessField::Parent => "t302",
            ProcessField::Initiator => "t365",
            ProcessField::Product => "t305",
            ProcessField::Service => "t313",
            ProcessField::InformationSystem => "t319",
            ProcessField::Purpose => "t326",
            ProcessField::MicroPurpose => "t329",
            ProcessField::SubjectCategories => "t392",
            ProcessField::SubjectsCount => "t333",
            ProcessField::LegalBasis => "t336",
            ProcessField::LegalBasisOther => "t600",
            ProcessField::LegalAct => "t338",
            ProcessField::Method => "t347",
            ProcessField::Term => "t350",
            ProcessField::Destruction => "t352",
        }
    }

    /// Метка поля в строке отчёта 480
    pub fn record_label(&self) -> &'static str {
        match self {
            ProcessField::Name => "Процесс",
            ProcessField::Status => "Статус",
            ProcessField::Group => "Группа",
            ProcessField::Parent => "Родительский (Процесс)",
            ProcessField::Initiator => "Инициатор (Пользователь)",
            ProcessField::Product => "Продукт",
            ProcessField::Service => "Сервис",
            ProcessField::InformationSystem => "ИС",
            ProcessField::Purpose => "Цель обработки ПДн",
            ProcessField::MicroPurpose => "Микроцель обработки ПДн",
            ProcessField::SubjectCategories => "Категории субъектов ПДн",
            ProcessField::SubjectsCount => "Количество субъектов ПДн",
            ProcessField::LegalBasis => "Основание обработки ПДн",
            ProcessField::LegalBasisOther => "Иное основание",
            ProcessField::LegalAct => "Реквизиты нормативного правового акта",
            ProcessField::Method => "Способ обработки ПДн",
            ProcessField::Term => "Срок обработки ПДн",
            ProcessField::Destruction => "Порядок уничтожения ПДн",
        }
    }

    /// Подпись поля в форме
    pub fn caption(&self) -> &'static str {
        match self {
            ProcessField::Name => "Название процесса",
            ProcessField::Parent => "Родительский процесс",
            ProcessField::InformationSystem => "Информационная система",
            ProcessField::LegalBasisOther => "Иное основание",
            other => other.record_label(),
        }
    }

    /// Справочник, из которого заполняется выпадающий список
    pub fn reference(&self) -> Option<&'static str> {
        match self {
            ProcessField::Status => Some("Статус"),
            ProcessField::Group => Some("Группа"),
            ProcessField::Initiator => Some("Инициатор"),
            ProcessField::Product => Some("Продукт"),
            ProcessField::Service => Some("Сервис"),
            ProcessField::InformationSystem => Some("ИС"),
            ProcessField::Purpose => Some("Цель обработки ПДн"),
            ProcessField::MicroPurpose => Some("Микроцель обработки ПДн"),
            ProcessField::SubjectCategories => Some("Категории субъектов ПДн"),
            ProcessField::SubjectsCount => Some("Количество субъектов ПДн"),
            ProcessField::LegalBasis => Some("Основание обработки ПДн"),
            ProcessField::Method => Some("Способ обработки ПДн"),
            ProcessField::Term => Some("Срок обработки ПДн"),
            _ => None,
        }
    }

    /// Вкладка формы, на которой выводится поле
    pub fn tab(&self) -> FormTab {
        match self {
            ProcessField::Name
            | ProcessField::Status
            | ProcessField::Group
            | ProcessField::Parent
            | ProcessField::Initiator
            | ProcessField::Product
            | ProcessField::Service
            | ProcessField::InformationSystem => FormTab::General,
            ProcessField::Purpose
            | ProcessField::MicroPurpose
            | ProcessField::SubjectCategories
            | ProcessField::SubjectsCount
            | ProcessField::LegalBasis
            | ProcessField::LegalBasisOther
            | ProcessField::LegalAct => FormTab::Purpose,
            ProcessField::Method | ProcessField::Term | ProcessField::Destruction => {
                FormTab::Processing
            }
        }
    }

    /// Поля, значения которых приходят экранированными
    pub fn is_free_text(&self) -> bool {
        matches!(
            self,
            ProcessField::Name
                | ProcessField::LegalBasisOther
                | ProcessField::LegalAct
                | ProcessField::Destruction
        )
    }
}

/// Поля вкладки в порядке вывода
pub fn fields_on(tab: FormTab) -> Vec<ProcessField> {
    ProcessField::ALL
        .into_iter()
        .filter(|field| field.tab() == tab)
        .collect()
}

/// Справочники, которые загружаются при первом открытии формы
pub fn reference_names() -> Vec<&'static str> {
    ProcessField::ALL
        .iter()
        .filter_map(|field| field.reference())
        .collect()
}
