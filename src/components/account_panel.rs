//! Account Panel
//!
//! Profile editing, password change and user administration.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::profile::{self, PasswordArgs, ProfileArgs};
use crate::api::users;
use crate::components::delete_confirm_button::DeleteConfirmButton;
use crate::context::use_app_context;
use crate::forms::{FieldErrors, PasswordForm};
use crate::store::{use_app_store, AppStateStoreFields};

#[component]
pub fn AccountPanel() -> impl IntoView {
    view! {
        <div class="account-panel">
            <ProfileSection />
            <PasswordSection />
            <UserAdminSection />
        </div>
    }
}

#[component]
fn ProfileSection() -> impl IntoView {
    let ctx = use_app_context();

    let (name, set_name) = signal(String::new());
    let (avatar, set_avatar) = signal(String::new());
    let (email, set_email) = signal(String::new());
    let (error, set_error) = signal(None::<String>);

    let api = ctx.api();
    spawn_local(async move {
        if let Ok(user) = profile::get_profile(&api).await {
            set_name.set(user.name);
            set_avatar.set(user.avatar.unwrap_or_default());
            set_email.set(user.email.unwrap_or_default());
        }
    });

    let save = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let new_name = name.get_untracked().trim().to_string();
        if new_name.is_empty() {
            set_error.set(Some("请输入昵称".to_string()));
            return;
        }
        set_error.set(None);
        let new_avatar = avatar.get_untracked().trim().to_string();
        let api = ctx.api();
        spawn_local(async move {
            let args = ProfileArgs {
                name: &new_name,
                avatar: (!new_avatar.is_empty()).then_some(new_avatar.as_str()),
            };
            if let Ok(user) = profile::update_profile(&api, &args).await {
                tracing::info!(user = %user.id, "profile updated");
                set_name.set(user.name);
                ctx.toaster.success("资料已更新");
            }
        });
    };

    view! {
        <section class="account-section">
            <h3>"个人资料"</h3>
            <form class="profile-form" on:submit=save>
                <label>
                    "邮箱"
                    <input type="text" disabled=true prop:value=move || email.get() />
                </label>
                <label>
                    "昵称"
                    <input
                        type="text"
                        prop:value=move || name.get()
                        on:input=move |ev| set_name.set(event_target_value(&ev))
                    />
                </label>
                {move || error.get().map(|e| view! { <span class="field-error">{e}</span> })}
                <label>
                    "头像地址"
                    <input
                        type="url"
                        prop:value=move || avatar.get()
                        on:input=move |ev| set_avatar.set(event_target_value(&ev))
                    />
                </label>
                <button type="submit">"保存"</button>
            </form>
        </section>
    }
}

#[component]
fn PasswordSection() -> impl IntoView {
    let ctx = use_app_context();

    let (old_password, set_old_password) = signal(String::new());
    let (new_password, set_new_password) = signal(String::new());
    let (confirm, set_confirm) = signal(String::new());
    let (errors, set_errors) = signal(FieldErrors::default());

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let form = PasswordForm {
            old_password: old_password.get_untracked(),
            new_password: new_password.get_untracked(),
            confirm: confirm.get_untracked(),
        };
        if let Err(e) = form.validate() {
            set_errors.set(e);
            return;
        }
        set_errors.set(FieldErrors::default());

        let api = ctx.api();
        spawn_local(async move {
            let args = PasswordArgs { old_password: &form.old_password, new_password: &form.new_password };
            if profile::change_password(&api, &args).await.is_ok() {
                ctx.toaster.success("密码已修改");
                set_old_password.set(String::new());
                set_new_password.set(String::new());
                set_confirm.set(String::new());
            }
        });
    };

    let field_error = move |field: &'static str| {
        move || errors.with(|e| e.get(field).map(|m| view! { <span class="field-error">{m.to_string()}</span> }))
    };

    view! {
        <section class="account-section">
            <h3>"修改密码"</h3>
            <form class="password-form" on:submit=submit>
                <input
                    type="password"
                    placeholder="原密码"
                    prop:value=move || old_password.get()
                    on:input=move |ev| set_old_password.set(event_target_value(&ev))
                />
                {field_error("old_password")}
                <input
                    type="password"
                    placeholder="新密码"
                    prop:value=move || new_password.get()
                    on:input=move |ev| set_new_password.set(event_target_value(&ev))
                />
                {field_error("password")}
                <input
                    type="password"
                    placeholder="确认新密码"
                    prop:value=move || confirm.get()
                    on:input=move |ev| set_confirm.set(event_target_value(&ev))
                />
                {field_error("confirm")}
                <button type="submit">"修改"</button>
            </form>
        </section>
    }
}

#[component]
fn UserAdminSection() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();

    let me = move || ctx.session.current().map(|s| s.user_id).unwrap_or_default();

    let remove_user = move |id: String| {
        let api = ctx.api();
        spawn_local(async move {
            if users::delete_user(&api, &id).await.is_ok() {
                tracing::info!(user = %id, "user deleted");
                store.users().write().retain(|u| u.id != id);
                ctx.toaster.success("用户已删除");
            }
        });
    };

    view! {
        <section class="account-section">
            <h3>"用户管理"</h3>
            <table class="user-table">
                <thead>
                    <tr><th>"昵称"</th><th>"邮箱"</th><th></th></tr>
                </thead>
                <tbody>
                    <For
                        each=move || store.users().get()
                        key=|u| u.id.clone()
                        children=move |user| {
                            let is_me = user.id == me();
                            let id = user.id.clone();
                            view! {
                                <tr>
                                    <td>{user.name.clone()}</td>
                                    <td>{user.email.clone().unwrap_or_default()}</td>
                                    <td>
                                        {(!is_me).then(|| view! {
                                            <DeleteConfirmButton
                                                button_class="user-delete-btn"
                                                prompt="删除用户?"
                                                on_confirm=move |_: ()| remove_user(id.clone())
                                            />
                                        })}
                                    </td>
                                </tr>
                            }
                        }
                    />
                </tbody>
            </table>
        </section>
    }
}
