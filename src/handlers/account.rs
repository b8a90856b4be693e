//! Login, logout and identity commands

use std::io::Write;
use crate::services::ServiceFactory;
use crate::utils::errors::Result;

pub async fn handle_login<W: Write>(services: &ServiceFactory, out: &mut W, email: &str, password: &str) -> Result<()> {
    let destination = services.auth_service.login(email, password).await?;
    let session = services.session().current();

    writeln!(out, "Logged in as {}", session.as_ref().map(|s| s.email.as_str()).unwrap_or(email))?;
    if let Some(session) = session {
        writeln!(out, "Role: {}", session.role)?;
    }
    writeln!(out, "Redirecting to {}", destination)?;
    Ok(())
}

pub fn handle_logout<W: Write>(services: &ServiceFactory, out: &mut W) -> Result<()> {
    services.auth_service.logout()?;
    writeln!(out, "Logged out")?;
    Ok(())
}

pub fn handle_whoami<W: Write>(services: &ServiceFactory, out: &mut W) -> Result<()> {
    match services.auth_service.current() {
        Some(session) => {
            writeln!(out, "Email:   {}", session.email)?;
            writeln!(out, "Role:    {}", session.role)?;
            match session.user_id {
                Some(id) => writeln!(out, "User ID: {}", id)?,
                None => writeln!(out, "User ID: unknown")?,
            }
        }
        None => writeln!(out, "Not logged in")?,
    }
    Ok(())
}
