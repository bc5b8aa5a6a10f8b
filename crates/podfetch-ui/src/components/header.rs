use crate::app::Route;
use crate::app::api::ApiCtx;
use crate::app::preferences::persist_sidebar_collapsed;
use crate::core::store::{AppStore, clear_login, stop, toggle_sidebar};
use crate::i18n::{DEFAULT_LOCALE, LocaleCode, TranslationBundle};
use yew::prelude::*;
use yew_router::prelude::*;
use yewdux::prelude::{Dispatch, use_selector};

#[derive(Properties, PartialEq)]
pub(crate) struct HeaderProps {
    pub locale: LocaleCode,
    pub on_locale_change: Callback<LocaleCode>,
}

#[function_component(Header)]
pub(crate) fn header(props: &HeaderProps) -> Html {
    let bundle = use_context::<TranslationBundle>()
        .unwrap_or_else(|| TranslationBundle::new(DEFAULT_LOCALE));
    let t = |key: &str| bundle.text(key);
    let api_ctx = use_context::<ApiCtx>();
    let navigator = use_navigator();
    let user = use_selector(|store: &AppStore| store.common.login_data.clone());

    let on_toggle = Callback::from(|_: MouseEvent| {
        let mut collapsed = false;
        Dispatch::<AppStore>::new().reduce_mut(|store| {
            collapsed = toggle_sidebar(&mut store.common);
        });
        persist_sidebar_collapsed(collapsed);
    });

    let on_logout = Callback::from(move |_: MouseEvent| {
        if let Some(api_ctx) = &api_ctx {
            api_ctx.sign_out();
        }
        Dispatch::<AppStore>::new().reduce_mut(|store| {
            clear_login(&mut store.common);
            stop(&mut store.audio_player);
        });
        if let Some(navigator) = &navigator {
            navigator.push(&Route::Login);
        }
    });

    let on_locale = {
        let on_locale_change = props.on_locale_change.clone();
        Callback::from(move |e: Event| {
            if let Some(select) = e.target_dyn_into::<web_sys::HtmlSelectElement>() {
                if let Some(next) = LocaleCode::from_lang_tag(&select.value()) {
                    on_locale_change.emit(next);
                }
            }
        })
    };

    html! {
        <header class="col-span-6 flex items-center justify-between gap-4 px-4 py-3 bg-gray-800 text-white">
            <div class="flex items-center gap-3">
                <button class="md:hidden" aria-label={t("header.toggle_sidebar")} onclick={on_toggle}>
                    <i class="fa-solid fa-bars"></i>
                </button>
                <Link<Route> to={Route::Home} classes="flex items-center text-xl font-semibold">
                    <i class="fa-solid fa-music mr-3"></i>
                    {"PodFetch"}
                </Link<Route>>
            </div>
            <div class="flex items-center gap-4">
                <label class="flex items-center gap-2 text-sm">
                    <span class="sr-only">{t("header.locale")}</span>
                    <select class="bg-gray-700 rounded px-2 py-1" onchange={on_locale}>
                        {for LocaleCode::all().iter().map(|lc| html! {
                            <option value={lc.code()} selected={*lc == props.locale}>{lc.label()}</option>
                        })}
                    </select>
                </label>
                {if let Some(user) = &*user {
                    html! {
                        <>
                            <span class="text-sm text-gray-300">{format!("{} {}", t("header.signed_in_as"), user.username)}</span>
                            <button class="text-sm hover:text-blue-400" onclick={on_logout}>{t("header.logout")}</button>
                        </>
                    }
                } else { html! {} }}
            </div>
        </header>
    }
}
