use crate::shared::icons::icon;
use contracts::shared::list_query::PageItem;
use leptos::prelude::*;

/// Навигация по страницам: назад, номера с многоточиями, вперёд.
/// Страницы нумеруются с 1; при одной странице панель не выводится.
#[component]
pub fn PaginationControls(
    #[prop(into)] current_page: Signal<usize>,
    #[prop(into)] total_pages: Signal<usize>,
    /// Номера страниц для вывода
    #[prop(into)]
    pages: Signal<Vec<PageItem>>,
    on_page_change: Callback<usize>,
) -> impl IntoView {
    view! {
        <Show when=move || { total_pages.get() > 1 }>
            <nav class="pagination-controls" aria-label="Страницы">
                <button
                    class="pagination-btn"
                    on:click=move |_| on_page_change.run(current_page.get().saturating_sub(1))
                    disabled=move || current_page.get() <= 1
                    title="Предыдущая страница"
                >
                    {icon("chevron-left")}
                </button>
                {move || {
                    let current = current_page.get();
                    pages
                        .get()
                        .into_iter()
                        .map(|item| match item {
                            PageItem::Page(n) => view! {
                                <button
                                    class="pagination-btn"
                                    class:pagination-btn--active=n == current
                                    on:click=move |_| on_page_change.run(n)
                                >
                                    {n.to_string()}
                                </button>
                            }
                            .into_any(),
                            PageItem::Ellipsis => {
                                view! { <span class="pagination-ellipsis">"…"</span> }.into_any()
                            }
                        })
                        .collect_view()
                }}
                <button
                    class="pagination-btn"
                    on:click=move |_| on_page_change.run(current_page.get() + 1)
                    disabled=move || current_page.get() >= total_pages.get()
                    title="Следующая страница"
                >
                    {icon("chevron-right")}
                </button>
            </nav>
        </Show>
    }
}
