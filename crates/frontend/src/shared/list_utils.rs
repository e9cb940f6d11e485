//! Утилиты для списков: поиск с задержкой и подсветка совпадений
use contracts::shared::debounce::DebounceGate;
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;
use std::rc::Rc;

/// Подсветка совпадений в тексте (без учёта регистра)
pub fn highlight_matches(text: &str, filter: &str) -> AnyView {
    let filter_lower = filter.trim().to_lowercase();
    if filter_lower.is_empty() {
        return view! { <span>{text.to_string()}</span> }.into_any();
    }

    // Позиции ищем в исходном тексте посимвольно: у кириллицы длина в байтах
    // может меняться при смене регистра
    let chars: Vec<char> = text.chars().collect();
    let needle: Vec<char> = filter_lower.chars().collect();
    let lower: Vec<char> = chars
        .iter()
        .map(|c| c.to_lowercase().next().unwrap_or(*c))
        .collect();

    let mut parts: Vec<AnyView> = Vec::new();
    let mut last = 0;
    let mut i = 0;
    while i + needle.len() <= lower.len() {
        if lower[i..i + needle.len()] == needle[..] {
            if i > last {
                let before: String = chars[last..i].iter().collect();
                parts.push(view! { <span>{before}</span> }.into_any());
            }
            let matched: String = chars[i..i + needle.len()].iter().collect();
            parts.push(view! { <mark class="search-highlight">{matched}</mark> }.into_any());
            i += needle.len();
            last = i;
        } else {
            i += 1;
        }
    }

    if parts.is_empty() {
        return view! { <span>{text.to_string()}</span> }.into_any();
    }
    if last < chars.len() {
        let rest: String = chars[last..].iter().collect();
        parts.push(view! { <span>{rest}</span> }.into_any());
    }

    view! { <>{parts}</> }.into_any()
}

/// Компонент поиска с debounce и кнопкой очистки
#[component]
pub fn SearchInput(
    /// Текущее значение фильтра (начальное значение поля)
    #[prop(into)]
    value: Signal<String>,
    /// Вызывается после паузы ввода
    #[prop(into)]
    on_change: Callback<String>,
    #[prop(optional, into)]
    placeholder: String,
    /// Пауза ввода, мс
    #[prop(optional)]
    delay_ms: Option<u32>,
) -> impl IntoView {
    let placeholder = if placeholder.is_empty() {
        "Поиск...".to_string()
    } else {
        placeholder
    };
    let delay = delay_ms.unwrap_or(300);

    // Локальное состояние для input (до debounce)
    let (input_value, set_input_value) = signal(value.get_untracked());
    let gate = StoredValue::new_local(Rc::new(DebounceGate::new()));

    let handle_input_change = move |new_value: String| {
        set_input_value.set(new_value.clone());

        let gate = gate.get_value();
        let ticket = gate.trigger();
        spawn_local(async move {
            TimeoutFuture::new(delay).await;
            if gate.is_current(ticket) {
                on_change.run(new_value);
            }
        });
    };

    let is_filter_active = move || !value.get().trim().is_empty();

    let clear_filter = move |_| {
        // отменяет ожидающий запуск
        gate.get_value().trigger();
        set_input_value.set(String::new());
        on_change.run(String::new());
    };

    view! {
        <div class="search-input" class:search-input--active=is_filter_active>
            <span class="search-input__icon">{crate::shared::icons::icon("search")}</span>
            <input
                type="text"
                class="search-input__field"
                placeholder=placeholder
                prop:value=move || input_value.get()
                on:input=move |ev| handle_input_change(event_target_value(&ev))
            />
            {move || if !input_value.get().is_empty() {
                view! {
                    <button class="search-input__clear" on:click=clear_filter title="Очистить">
                        {crate::shared::icons::icon("x")}
                    </button>
                }.into_any()
            } else {
                view! { <></> }.into_any()
            }}
        </div>
    }
}
