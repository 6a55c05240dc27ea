//! Sign-In Page
//!
//! Login and registration tabs. A successful login stores the token
//! through the session context, which switches the app to the board.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::auth::{self, LoginArgs, RegisterArgs};
use crate::context::use_app_context;
use crate::forms::{FieldErrors, RegisterForm, SignInForm};

#[derive(Clone, Copy, PartialEq)]
enum Tab {
    Login,
    Register,
}

#[component]
pub fn SignInPage() -> impl IntoView {
    let (tab, set_tab) = signal(Tab::Login);

    view! {
        <div class="sign-in-page">
            <div class="sign-in-card">
                <div class="sign-in-tabs">
                    <button class:active=move || tab.get() == Tab::Login on:click=move |_| set_tab.set(Tab::Login)>
                        "登录"
                    </button>
                    <button class:active=move || tab.get() == Tab::Register on:click=move |_| set_tab.set(Tab::Register)>
                        "注册"
                    </button>
                </div>
                {move || match tab.get() {
                    Tab::Login => view! { <LoginForm /> }.into_any(),
                    Tab::Register => view! { <RegisterPanel on_done=Callback::new(move |_: ()| set_tab.set(Tab::Login)) /> }.into_any(),
                }}
            </div>
        </div>
    }
}

fn error_line(errors: ReadSignal<FieldErrors>, field: &'static str) -> impl Fn() -> Option<AnyView> + Copy {
    move || errors.with(|e| e.get(field).map(|m| view! { <span class="field-error">{m.to_string()}</span> }.into_any()))
}

#[component]
fn LoginForm() -> impl IntoView {
    let ctx = use_app_context();

    let (username, set_username) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (errors, set_errors) = signal(FieldErrors::default());
    let (pending, set_pending) = signal(false);

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let form = SignInForm { username: username.get_untracked(), password: password.get_untracked() };
        if let Err(e) = form.validate() {
            set_errors.set(e);
            return;
        }
        set_errors.set(FieldErrors::default());
        set_pending.set(true);

        let api = ctx.api();
        spawn_local(async move {
            let args = LoginArgs { username: form.username.trim(), password: &form.password };
            match auth::login(&api, &args).await {
                Ok(resp) => match ctx.session.sign_in(&resp.token) {
                    Ok(session) => {
                        tracing::info!(user = %session.user_id, "signed in");
                        ctx.toaster.success(format!("欢迎回来, {}", session.name));
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "server issued an unusable token");
                        ctx.toaster.error("登录失败");
                    }
                },
                Err(e) => tracing::debug!(error = %e, "login failed"),
            }
            set_pending.set(false);
        });
    };

    view! {
        <form class="sign-in-form" on:submit=submit>
            <input
                type="text"
                placeholder="用户名"
                prop:value=move || username.get()
                on:input=move |ev| set_username.set(event_target_value(&ev))
            />
            {error_line(errors, "username")}
            <input
                type="password"
                placeholder="密码"
                prop:value=move || password.get()
                on:input=move |ev| set_password.set(event_target_value(&ev))
            />
            {error_line(errors, "password")}
            <button type="submit" disabled=move || pending.get()>"登录"</button>
        </form>
    }
}

#[component]
fn RegisterPanel(on_done: Callback<()>) -> impl IntoView {
    let ctx = use_app_context();

    let (username, set_username) = signal(String::new());
    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (confirm, set_confirm) = signal(String::new());
    let (errors, set_errors) = signal(FieldErrors::default());
    let (pending, set_pending) = signal(false);

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let form = RegisterForm {
            username: username.get_untracked(),
            email: email.get_untracked(),
            password: password.get_untracked(),
            confirm: confirm.get_untracked(),
        };
        if let Err(e) = form.validate() {
            set_errors.set(e);
            return;
        }
        set_errors.set(FieldErrors::default());
        set_pending.set(true);

        let api = ctx.api();
        spawn_local(async move {
            let args = RegisterArgs {
                username: form.username.trim(),
                email: form.email.trim(),
                password: &form.password,
            };
            if let Ok(user) = auth::register(&api, &args).await {
                tracing::info!(user = %user.id, "registered");
                ctx.toaster.success("注册成功，请登录");
                on_done.run(());
            }
            set_pending.set(false);
        });
    };

    view! {
        <form class="sign-in-form" on:submit=submit>
            <input
                type="text"
                placeholder="用户名"
                prop:value=move || username.get()
                on:input=move |ev| set_username.set(event_target_value(&ev))
            />
            {error_line(errors, "username")}
            <input
                type="email"
                placeholder="邮箱"
                prop:value=move || email.get()
                on:input=move |ev| set_email.set(event_target_value(&ev))
            />
            {error_line(errors, "email")}
            <input
                type="password"
                placeholder="密码"
                prop:value=move || password.get()
                on:input=move |ev| set_password.set(event_target_value(&ev))
            />
            {error_line(errors, "password")}
            <input
                type="password"
                placeholder="确认密码"
                prop:value=move || confirm.get()
                on:input=move |ev| set_confirm.set(event_target_value(&ev))
            />
            {error_line(errors, "confirm")}
            <button type="submit" disabled=move || pending.get()>"注册"</button>
        </form>
    }
}
