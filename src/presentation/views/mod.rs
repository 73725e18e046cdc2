//! HTML pages rendered from structured data. Every user-controlled string
//! goes through `htmlescape` before interpolation.

use htmlescape::{encode_attribute, encode_minimal as escape_html};

use crate::domain::items::item::Item;

const STYLE: &str = "* { margin: 0; padding: 0; }\n\
    body { font-family: Arial, sans-serif; background: #f0f0f0; }\n\
    .container { max-width: 720px; margin: 40px auto; background: white; padding: 30px; border-radius: 5px; box-shadow: 0 0 10px rgba(0,0,0,0.1); }\n\
    h1, h2 { color: #333; margin-bottom: 20px; }\n\
    input, textarea { width: 100%; padding: 10px; margin: 10px 0; border: 1px solid #ddd; border-radius: 3px; font-family: inherit; }\n\
    button { padding: 10px 20px; margin: 10px 0; background: #007bff; color: white; border: none; border-radius: 3px; cursor: pointer; }\n\
    table { width: 100%; border-collapse: collapse; }\n\
    th { background: #f0f0f0; padding: 10px; text-align: left; border-bottom: 2px solid #ddd; }\n\
    td { padding: 10px; border-bottom: 1px solid #ddd; }\n\
    a { color: #007bff; text-decoration: none; }";

fn page(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\" />\n\
         <title>{title}</title>\n<style>{STYLE}</style>\n</head>\n<body>\n\
         <div class=\"container\">\n{body}\n</div>\n</body>\n</html>\n",
        title = escape_html(title),
        body = body,
    )
}

pub fn register_page() -> String {
    page(
        "Register",
        "<h1>Create Account</h1>\n\
         <form method=\"POST\" action=\"/register\">\n\
         <input type=\"text\" name=\"name\" placeholder=\"Full Name\" required />\n\
         <input type=\"email\" name=\"email\" placeholder=\"Email Address\" required />\n\
         <input type=\"password\" name=\"password\" placeholder=\"Password (min 6 chars)\" required minlength=\"6\" />\n\
         <button type=\"submit\">Register</button>\n\
         </form>\n\
         <p>Already have an account? <a href=\"/login\">Login here</a></p>",
    )
}

pub fn login_page() -> String {
    page(
        "Login",
        "<h1>Login</h1>\n\
         <form method=\"POST\" action=\"/login\">\n\
         <input type=\"email\" name=\"email\" placeholder=\"Email Address\" required />\n\
         <input type=\"password\" name=\"password\" placeholder=\"Password\" required />\n\
         <button type=\"submit\">Login</button>\n\
         </form>\n\
         <p>Don't have an account? <a href=\"/register\">Register here</a></p>",
    )
}

pub fn dashboard_page(user_name: &str, items: &[Item]) -> String {
    let rows = if items.is_empty() {
        "<tr><td colspan=\"3\">No items yet. Add one below!</td></tr>\n".to_string()
    } else {
        items
            .iter()
            .map(|item| {
                let description = match item.description.as_deref() {
                    Some(d) if !d.is_empty() => escape_html(d),
                    _ => "-".to_string(),
                };
                format!(
                    "<tr><td>{}</td><td>{}</td>\
                     <td><a href=\"/edit/{id}\">Edit</a> <a href=\"/delete/{id}\">Delete</a></td></tr>\n",
                    escape_html(&item.title),
                    description,
                    id = item.id,
                )
            })
            .collect()
    };
    let body = format!(
        "<h1>Welcome, {}!</h1>\n<p><a href=\"/logout\">Logout</a></p>\n\
         <h2>Add New Item</h2>\n\
         <form method=\"POST\" action=\"/add-item\">\n\
         <input type=\"text\" name=\"title\" placeholder=\"Item Title (e.g., Buy groceries)\" required />\n\
         <textarea name=\"description\" placeholder=\"Description (optional)\"></textarea>\n\
         <button type=\"submit\">+ Add Item</button>\n\
         </form>\n\
         <h2>Your Items</h2>\n\
         <table>\n<tr><th>Title</th><th>Description</th><th>Actions</th></tr>\n{}</table>",
        escape_html(user_name),
        rows,
    );
    page("Dashboard", &body)
}

pub fn edit_page(item: &Item) -> String {
    let body = format!(
        "<h1>Edit Item</h1>\n\
         <form method=\"POST\" action=\"/edit/{id}\">\n\
         <input type=\"text\" name=\"title\" value=\"{title}\" required />\n\
         <textarea name=\"description\" placeholder=\"Description (optional)\">{description}</textarea>\n\
         <button type=\"submit\">Save Changes</button>\n\
         </form>\n\
         <p><a href=\"/dashboard\">Back to dashboard</a></p>",
        id = item.id,
        title = encode_attribute(&item.title),
        description = escape_html(item.description.as_deref().unwrap_or("")),
    );
    page("Edit Item", &body)
}
