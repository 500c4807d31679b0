use axum::response::{Html, IntoResponse};

// Placeholder page at the redirect target; the login flow itself lives elsewhere.
const LOGIN_PAGE: &str = r#"<!doctype html>
<html lang="en">
  <head>
    <meta charset="utf-8">
    <title>Sign in - trainbook</title>
  </head>
  <body>
    <main>
      <h1>Sign in</h1>
      <p>You need to sign in to view this page.</p>
    </main>
  </body>
</html>
"#;

#[utoipa::path(
    get,
    path= "/login",
    responses (
        (status = 200, description = "Login page"),
    ),
    tag= "session"
)]
pub async fn login() -> impl IntoResponse {
    Html(LOGIN_PAGE)
}
