/// Placeholder replaced by the page head fragment.
pub const HEAD_PLACEHOLDER: &str = "<!--app-head-->";

/// Placeholder replaced by the rendered application markup.
pub const HTML_PLACEHOLDER: &str = "<!--app-html-->";

/// Template used when no `index.html` is found on disk.
pub const INDEX_HTML: &str = r#"<!doctype html>
<html lang="en">
  <head>
    <meta charset="UTF-8" />
    <meta name="viewport" content="width=device-width, initial-scale=1.0" />
    <!--app-head-->
  </head>
  <body>
    <div id="app"><!--app-html--></div>
  </body>
</html>
"#;
