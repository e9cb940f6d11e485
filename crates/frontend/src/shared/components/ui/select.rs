use contracts::shared::reference::SelectOption;
use leptos::prelude::*;

/// Выпадающий список с подписью
#[component]
pub fn Select(
    #[prop(optional, into)] label: MaybeProp<String>,
    /// Выбранное значение
    #[prop(into)]
    value: Signal<String>,
    #[prop(optional)] on_change: Option<Callback<String>>,
    /// Варианты в порядке вывода
    #[prop(into)]
    options: Signal<Vec<SelectOption>>,
    #[prop(optional, into)] disabled: Signal<bool>,
    #[prop(optional)] required: bool,
    #[prop(optional, into)] id: MaybeProp<String>,
) -> impl IntoView {
    let select_id = move || id.get().unwrap_or_default();

    view! {
        <div class="form__group">
            {move || label.get().map(|l| view! {
                <label class="form__label" for=select_id>
                    {l}
                    {required.then(|| view! { <span class="form__required">" *"</span> })}
                </label>
            })}
            <select
                id=select_id
                class="form__select"
                disabled=move || disabled.get()
                required=required
                on:change=move |ev| {
                    if let Some(handler) = on_change {
                        handler.run(event_target_value(&ev));
                    }
                }
            >
                <For
                    each=move || options.get()
                    key=|option| option.value.clone()
                    children=move |option| {
                        let option_value = option.value.clone();
                        let is_selected = move || value.get() == option_value;
                        view! {
                            <option value=option.value selected=is_selected>
                                {option.label}
                            </option>
                        }
                    }
                />
            </select>
        </div>
    }
}
