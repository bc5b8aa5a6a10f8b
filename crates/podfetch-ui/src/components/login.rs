//! Sign-in screen.
//!
//! # Design
//! - Render only a loading indicator until the server config is known.
//! - Show each login control only when the config enables it.
//! - Storage and header side effects run after the server accepts; rejections
//!   surface the server text verbatim with no retry.

use crate::app::Route;
use crate::app::api::ApiCtx;
use crate::components::loading::Loading;
use crate::components::oidc::OidcLogin;
use crate::core::auth::{LOGIN_REDIRECT_DELAY_MS, LoginForm, LoginFormError, LoginOutcome};
use crate::core::logic::{LoginView, login_view};
use crate::core::store::{AppStore, set_login};
use crate::i18n::{DEFAULT_LOCALE, TranslationBundle};
use gloo_timers::callback::Timeout;
use yew::prelude::*;
use yew_router::prelude::*;
use yewdux::prelude::{Dispatch, use_selector};

const INPUT_CLASS: &str = "border sm:text-sm rounded-lg block w-full p-2.5 bg-gray-700 border-gray-600 placeholder-gray-400 text-white focus:ring-blue-500 focus:border-blue-500";

#[function_component(LoginPage)]
pub(crate) fn login_page() -> Html {
    let bundle = use_context::<TranslationBundle>()
        .unwrap_or_else(|| TranslationBundle::new(DEFAULT_LOCALE));
    let t = |key: &str| bundle.text(key);
    let api_ctx = use_context::<ApiCtx>();
    let navigator = use_navigator();
    let config = use_selector(|store: &AppStore| store.common.config.clone());
    let form = use_state(LoginForm::default);
    let field_error = use_state(|| None as Option<LoginFormError>);
    let alert = use_state(|| None as Option<String>);
    let busy = use_state(|| false);
    let redirect = use_mut_ref(|| None as Option<Timeout>);

    let LoginView::Ready { basic_auth, oidc } = login_view((*config).as_ref()) else {
        return html! { <Loading /> };
    };

    let on_username = {
        let form = form.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(input) = e.target_dyn_into::<web_sys::HtmlInputElement>() {
                let mut next = (*form).clone();
                next.username = input.value();
                form.set(next);
            }
        })
    };
    let on_password = {
        let form = form.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(input) = e.target_dyn_into::<web_sys::HtmlInputElement>() {
                let mut next = (*form).clone();
                next.password = input.value();
                form.set(next);
            }
        })
    };
    let on_remember = {
        let form = form.clone();
        Callback::from(move |e: Event| {
            if let Some(input) = e.target_dyn_into::<web_sys::HtmlInputElement>() {
                let mut next = (*form).clone();
                next.remember_me = input.checked();
                form.set(next);
            }
        })
    };
    let dismiss_alert = {
        let alert = alert.clone();
        Callback::from(move |_| alert.set(None))
    };

    let on_submit = {
        let form = form.clone();
        let field_error = field_error.clone();
        let alert = alert.clone();
        let busy = busy.clone();
        let redirect = redirect.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let data = match form.validate() {
                Ok(data) => data,
                Err(err) => {
                    field_error.set(Some(err));
                    return;
                }
            };
            field_error.set(None);
            let Some(api_ctx) = api_ctx.clone() else {
                return;
            };
            busy.set(true);
            let alert = alert.clone();
            let busy = busy.clone();
            let redirect = redirect.clone();
            let navigator = navigator.clone();
            yew::platform::spawn_local(async move {
                let response = api_ctx.client.login(&data).await.map_err(|err| err.message);
                busy.set(false);
                match LoginOutcome::resolve(&data, response) {
                    LoginOutcome::Authenticated(success) => {
                        api_ctx.sign_in(&success);
                        Dispatch::<AppStore>::new().reduce_mut(|store| {
                            set_login(&mut store.common, success.user.clone());
                        });
                        alert.set(None);
                        let handle = Timeout::new(LOGIN_REDIRECT_DELAY_MS, move || {
                            if let Some(navigator) = navigator {
                                navigator.push(&Route::Root);
                            }
                        });
                        *redirect.borrow_mut() = Some(handle);
                    }
                    LoginOutcome::Rejected(message) => alert.set(Some(message)),
                }
            });
        })
    };

    let invalid = |which: LoginFormError| (*field_error == Some(which)).then_some("true");

    html! {
        <section class="bg-gray-900 h-full">
            <div class="flex flex-col items-center justify-center px-6 py-8 mx-auto md:h-screen lg:py-0">
                <a href="#" class="flex items-center mb-6 text-2xl font-semibold text-white">
                    <i class="fa-solid fa-music mr-5"></i>
                    {"PodFetch"}
                </a>
                <div class="w-full rounded-lg shadow border md:mt-0 sm:max-w-md xl:p-0 bg-gray-800 border-gray-700">
                    <div class="p-6 space-y-4 md:space-y-6 sm:p-8">
                        <h1 class="text-xl font-bold leading-tight tracking-tight md:text-2xl text-white">
                            {t("login.title")}
                        </h1>
                        {if basic_auth {
                            html! {
                                <form class="space-y-4 md:space-y-6" onsubmit={on_submit}>
                                    {if let Some(message) = &*alert {
                                        html! {
                                            <div class="bg-red-100 border border-red-400 text-red-700 px-4 py-3 rounded relative" role="alert">
                                                <strong class="font-bold">{t("login.error_authenticating")}</strong>
                                                <br />
                                                <span class="block sm:inline">{message}</span>
                                                <button type="button" class="absolute top-0 bottom-0 right-0 px-4 py-3" aria-label={t("login.dismiss")} onclick={dismiss_alert}>
                                                    {"✕"}
                                                </button>
                                            </div>
                                        }
                                    } else { html! {} }}
                                    <div>
                                        <label for="username" class="block mb-2 text-sm font-medium text-white">{t("login.username")}</label>
                                        <input type="text" id="username" autocomplete="username"
                                            class={INPUT_CLASS}
                                            placeholder={t("login.username_placeholder")}
                                            aria-invalid={invalid(LoginFormError::MissingUsername)}
                                            value={form.username.clone()}
                                            oninput={on_username} />
                                    </div>
                                    <div>
                                        <label for="password" class="block mb-2 text-sm font-medium text-white">{t("login.password")}</label>
                                        <input type="password" id="password" autocomplete="current-password"
                                            class={INPUT_CLASS}
                                            placeholder="••••••••"
                                            aria-invalid={invalid(LoginFormError::MissingPassword)}
                                            value={form.password.clone()}
                                            oninput={on_password} />
                                    </div>
                                    {if let Some(err) = *field_error {
                                        html! { <p class="text-sm text-red-400">{t(err.message_key())}</p> }
                                    } else { html! {} }}
                                    <div class="flex items-center h-5">
                                        <input id="remember" type="checkbox"
                                            class="w-4 h-4 border rounded bg-gray-700 border-gray-600"
                                            checked={form.remember_me}
                                            onchange={on_remember} />
                                        <label for="remember" class="ml-3 text-sm text-gray-300">{t("login.remember_me")}</label>
                                    </div>
                                    <button type="submit" disabled={*busy}
                                        class="w-full text-white font-medium rounded-lg text-sm px-5 py-2.5 text-center bg-blue-800 hover:bg-blue-700">
                                        {t("login.sign_in")}
                                    </button>
                                </form>
                            }
                        } else { html! {} }}
                        {if oidc { html! { <OidcLogin /> } } else { html! {} }}
                    </div>
                </div>
            </div>
        </section>
    }
}
