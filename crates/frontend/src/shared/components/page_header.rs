use leptos::prelude::*;

/// Заголовок страницы: название, строка состояния под ним, действия справа
#[component]
pub fn PageHeader(
    #[prop(into)] title: String,
    /// Например, счётчик "Показано N из M"
    #[prop(optional, into)]
    subtitle: MaybeProp<String>,
    children: Children,
) -> impl IntoView {
    view! {
        <header class="page-header">
            <div class="page-header__text">
                <h1 class="page-header__title">{title}</h1>
                {move || subtitle.get().filter(|s| !s.is_empty()).map(|s| view! {
                    <div class="page-header__subtitle">{s}</div>
                })}
            </div>
            <div class="page-header__actions">{children()}</div>
        </header>
    }
}
