//! Поиск и постраничный вывод для списков записей

use super::record::{record_contains, Record};

/// Нормализованный поисковый запрос; `None` означает "без фильтра"
pub fn normalize_query(query: &str) -> Option<String> {
    let q = query.trim().to_lowercase();
    if q.is_empty() {
        None
    } else {
        Some(q)
    }
}

/// Фильтрует записи по подстроке в любом поле (без учёта регистра).
/// Пустой запрос возвращает исходный список в исходном порядке.
pub fn filter_records(records: &[Record], query: &str) -> Vec<Record> {
    match normalize_query(query) {
        None => records.to_vec(),
        Some(q) => records
            .iter()
            .filter(|r| record_contains(r, &q))
            .cloned()
            .collect(),
    }
}

/// Количество страниц (0 для пустого списка)
pub fn total_pages(len: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    len.div_ceil(page_size)
}

/// Срез страницы `[(page-1)*size, page*size)`, страницы нумеруются с 1
pub fn paginate<T>(items: &[T], page: usize, page_size: usize) -> &[T] {
    if page == 0 || page_size == 0 {
        return &[];
    }
    let start = (page - 1).saturating_mul(page_size).min(items.len());
    let end = page.saturating_mul(page_size).min(items.len());
    &items[start..end]
}

/// Элемент строки номеров страниц
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageItem {
    Page(usize),
    Ellipsis,
}

/// Номера страниц для навигации: до 7 страниц показываются все, иначе окно
/// вокруг текущей плюс первая/последняя с многоточиями
pub fn visible_pages(current: usize, total: usize) -> Vec<PageItem> {
    use PageItem::{Ellipsis, Page};

    if total <= 7 {
        return (1..=total).map(Page).collect();
    }

    let mut pages = Vec::with_capacity(7);
    if current <= 4 {
        pages.extend((1..=5).map(Page));
        pages.push(Ellipsis);
        pages.push(Page(total));
    } else if current >= total - 3 {
        pages.push(Page(1));
        pages.push(Ellipsis);
        pages.extend((total - 4..=total).map(Page));
    } else {
        pages.push(Page(1));
        pages.push(Ellipsis);
        pages.extend((current - 1..=current + 1).map(Page));
        pages.push(Ellipsis);
        pages.push(Page(total));
    }
    pages
}

/// Состояние списка: исходные записи, отфильтрованное представление, страница
#[derive(Debug, Clone)]
pub struct PagedList {
    all: Vec<Record>,
    filtered: Vec<Record>,
    query: String,
    page: usize,
    page_size: usize,
}

impl PagedList {
    pub fn new(page_size: usize) -> Self {
        Self {
            all: Vec::new(),
            filtered: Vec::new(),
            query: String::new(),
            page: 1,
            page_size,
        }
    }

    /// Заменяет исходные данные целиком, текущий запрос применяется заново
    pub fn replace(&mut self, records: Vec<Record>) {
        self.all = records;
        self.refilter();
    }

    pub fn clear(&mut self) {
        self.replace(Vec::new());
    }

    pub fn search(&mut self, query: &str) {
        self.query = query.to_string();
        self.refilter();
    }

    fn refilter(&mut self) {
        self.filtered = filter_records(&self.all, &self.query);
        self.page = 1;
    }

    /// Переход на страницу; номер вне `[1, total_pages]` игнорируется
    pub fn go_to_page(&mut self, page: usize) -> bool {
        if page >= 1 && page <= self.total_pages() {
            self.page = page;
            true
        } else {
            false
        }
    }

    pub fn all(&self) -> &[Record] {
        &self.all
    }

    pub fn filtered(&self) -> &[Record] {
        &self.filtered
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn total_pages(&self) -> usize {
        total_pages(self.filtered.len(), self.page_size)
    }

    pub fn page_items(&self) -> &[Record] {
        paginate(&self.filtered, self.page, self.page_size)
    }

    pub fn visible_pages(&self) -> Vec<PageItem> {
        visible_pages(self.page, self.total_pages())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use PageItem::{Ellipsis, Page};

    fn records(n: usize) -> Vec<Record> {
        (1..=n)
            .map(|i| {
                json!({"ПроцессID": i.to_string(), "Процесс": format!("Процесс {}", i)})
                    .as_object()
                    .cloned()
                    .unwrap()
            })
            .collect()
    }

    #[test]
    fn test_visible_pages_examples() {
        assert_eq!(
            visible_pages(1, 10),
            vec![Page(1), Page(2), Page(3), Page(4), Page(5), Ellipsis, Page(10)]
        );
        assert_eq!(
            visible_pages(8, 10),
            vec![Page(1), Ellipsis, Page(6), Page(7), Page(8), Page(9), Page(10)]
        );
        assert_eq!(
            visible_pages(3, 5),
            vec![Page(1), Page(2), Page(3), Page(4), Page(5)]
        );
        assert_eq!(
            visible_pages(6, 12),
            vec![Page(1), Ellipsis, Page(5), Page(6), Page(7), Ellipsis, Page(12)]
        );
        assert!(visible_pages(1, 0).is_empty());
    }

    #[test]
    fn test_pages_reconstruct_list() {
        let items = records(45);
        let pages = total_pages(items.len(), 20);
        assert_eq!(pages, 3);

        let mut joined = Vec::new();
        for page in 1..=pages {
            let slice = paginate(&items, page, 20);
            assert!(slice.len() <= 20);
            joined.extend_from_slice(slice);
        }
        assert_eq!(joined, items);
        assert!(paginate(&items, 4, 20).is_empty());
        assert!(paginate(&items, 0, 20).is_empty());
    }

    #[test]
    fn test_search_subset_and_reset() {
        let mut list = PagedList::new(20);
        list.replace(records(30));
        assert!(list.go_to_page(2));

        list.search("  ПРОЦЕСС 1 ");
        assert_eq!(list.page(), 1);
        assert!(!list.filtered().is_empty());
        for r in list.filtered() {
            assert!(record_contains(r, "процесс 1"));
        }
        // "Процесс 1", "Процесс 10".."Процесс 19"
        assert_eq!(list.filtered().len(), 11);

        list.search("");
        assert_eq!(list.filtered(), list.all());
    }

    #[test]
    fn test_go_to_page_out_of_range_ignored() {
        let mut list = PagedList::new(20);
        list.replace(records(25));
        assert!(!list.go_to_page(0));
        assert!(!list.go_to_page(3));
        assert_eq!(list.page(), 1);
        assert!(list.go_to_page(2));
        assert_eq!(list.page_items().len(), 5);
    }
}
