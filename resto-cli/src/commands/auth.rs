use anyhow::Result;
use inquire::{Password, Text};
use resto_client::{HttpClient, Route};

use super::Context;

pub async fn login<C: HttpClient>(
    ctx: &mut Context<C>,
    email: Option<String>,
    password: Option<String>,
) -> Result<()> {
    let email = match email {
        Some(email) => email,
        None => Text::new("Email:").prompt()?,
    };
    let password = match password {
        Some(password) => password,
        None => Password::new("Password:").without_confirmation().prompt()?,
    };
    login_with(ctx, &email, &password).await
}

pub async fn login_with<C: HttpClient>(
    ctx: &mut Context<C>,
    email: &str,
    password: &str,
) -> Result<()> {
    let user = ctx.session.login(&mut ctx.api, email, password).await?;
    println!("Logged in as {} <{}>", user.name, user.email);
    println!("-> {}", Route::Dashboard);
    Ok(())
}

pub fn logout<C: HttpClient>(ctx: &mut Context<C>) -> Result<()> {
    ctx.session.logout(&mut ctx.api)?;
    println!("Logged out");
    println!("-> {}", Route::Login);
    Ok(())
}

pub fn whoami<C: HttpClient>(ctx: &Context<C>) -> Result<()> {
    let data = ctx.require_login()?;
    let roles: Vec<&str> = data.user.roles.iter().map(|r| r.name.as_str()).collect();
    println!("{} <{}>", data.user.name, data.user.email);
    if !roles.is_empty() {
        println!("roles: {}", roles.join(", "));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing;
    use resto_client::ClientError;
    use resto_mock::MockState;

    #[tokio::test]
    async fn test_logout_then_whoami_fails() {
        let state = MockState::seeded();
        let (mut ctx, _dir) = testing::context(&state).await;
        assert!(whoami(&ctx).is_ok());

        logout(&mut ctx).unwrap();
        let err = whoami(&ctx).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ClientError>(),
            Some(ClientError::NotLoggedIn)
        ));
    }

    #[tokio::test]
    async fn test_bad_password_message() {
        let state = MockState::seeded();
        let (mut ctx, _dir) = testing::context(&state).await;
        let err = login_with(&mut ctx, "kasir@resto.test", "nope")
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Invalid email or password");
    }
}
