//! OIDC sign-in control.
//!
//! Discovers the provider's authorization endpoint and redirects the browser
//! there with a fresh `state` value.

use crate::app::api::ApiCtx;
use crate::app::log_api_error;
use crate::app::preferences::persist_oidc_state;
use crate::core::oidc::{authorization_url, discovery_url};
use crate::core::store::AppStore;
use crate::i18n::{DEFAULT_LOCALE, TranslationBundle};
use gloo::console;
use gloo::utils::window;
use uuid::Uuid;
use yew::prelude::*;
use yewdux::prelude::use_selector;

#[function_component(OidcLogin)]
pub(crate) fn oidc_login() -> Html {
    let bundle = use_context::<TranslationBundle>()
        .unwrap_or_else(|| TranslationBundle::new(DEFAULT_LOCALE));
    let api_ctx = use_context::<ApiCtx>();
    let settings = use_selector(|store: &AppStore| {
        store
            .common
            .config
            .as_ref()
            .and_then(|config| config.active_oidc().cloned())
    });
    let failed = use_state(|| false);
    let busy = use_state(|| false);

    let on_click = {
        let failed = failed.clone();
        let busy = busy.clone();
        let settings = settings.clone();
        Callback::from(move |_: MouseEvent| {
            let (Some(api_ctx), Some(settings)) = (api_ctx.clone(), (*settings).clone()) else {
                return;
            };
            busy.set(true);
            failed.set(false);
            let failed = failed.clone();
            let busy = busy.clone();
            yew::platform::spawn_local(async move {
                let discovery = discovery_url(&settings.authority);
                match api_ctx.client.fetch_oidc_discovery(&discovery).await {
                    Ok(doc) => {
                        let state = Uuid::new_v4().to_string();
                        persist_oidc_state(&state);
                        let target = authorization_url(&doc.authorization_endpoint, &settings, &state);
                        if let Err(err) = window().location().set_href(&target) {
                            console::error!("oidc redirect failed", err);
                            failed.set(true);
                            busy.set(false);
                        }
                    }
                    Err(err) => {
                        log_api_error("oidc discovery", &err);
                        failed.set(true);
                        busy.set(false);
                    }
                }
            });
        })
    };

    html! {
        <div class="space-y-2">
            <button type="button" disabled={*busy} onclick={on_click}
                class="w-full text-white font-medium rounded-lg text-sm px-5 py-2.5 text-center bg-gray-700 hover:bg-gray-600">
                <i class="fa-solid fa-right-to-bracket mr-2"></i>
                {bundle.text("login.oidc")}
            </button>
            {if *failed {
                html! { <p class="text-sm text-red-400">{bundle.text("login.oidc_failed")}</p> }
            } else { html! {} }}
        </div>
    }
}
