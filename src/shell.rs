//! Page shell shared by every route: document head, navigation bar and the
//! content region a routed view is mounted into.

/// Escape text for use in HTML bodies and quoted attributes.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Lucide icon placeholder, hydrated client side by the lucide script.
pub fn icon(name: &str, class: &str) -> String {
    format!(r#"<i data-lucide="{}" class="{}"></i>"#, escape(name), escape(class))
}

fn nav_bar() -> String {
    format!(
        r#"<nav class="bg-white shadow-lg">
      <div class="max-w-7xl mx-auto px-4">
        <div class="flex justify-between h-16">
          <div class="flex items-center">
            <a href="/" class="flex items-center text-gray-900 hover:text-indigo-600">
              {}
              <span class="ml-2 font-semibold">SmartBank Analytics</span>
            </a>
          </div>
        </div>
      </div>
    </nav>"#,
        icon("home", "h-6 w-6")
    )
}

/// Wrap routed content in the document and navigation shell.
pub fn page(title: &str, content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
  <head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>{title}</title>
    <script src="https://cdn.tailwindcss.com"></script>
    <link rel="stylesheet" href="/static/dashboard.css">
  </head>
  <body class="min-h-screen bg-gray-100">
    {nav}
    <main id="content" class="max-w-7xl mx-auto py-6 sm:px-6 lg:px-8">{content}</main>
    <script src="https://unpkg.com/lucide@latest"></script>
    <script>lucide.createIcons();</script>
  </body>
</html>
"#,
        title = escape(title),
        nav = nav_bar(),
        content = content,
    )
}
