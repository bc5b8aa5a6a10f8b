use crate::i18n::{DEFAULT_LOCALE, TranslationBundle};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub(crate) struct LoadingProps {
    #[prop_or_default]
    pub class: Classes,
}

#[function_component(Loading)]
pub(crate) fn loading(props: &LoadingProps) -> Html {
    let bundle = use_context::<TranslationBundle>()
        .unwrap_or_else(|| TranslationBundle::new(DEFAULT_LOCALE));
    html! {
        <div class={classes!("flex", "h-full", "items-center", "justify-center", "p-8", props.class.clone())}>
            <span class="loading loading-spinner loading-lg" role="status" aria-label={bundle.text("common.loading")} />
        </div>
    }
}
