//! Server-rendered HTML pages.
//!
//! Plain string assembly with entity escaping; the pages are small enough
//! that a template engine would be more machinery than markup.

use crate::catalog::CarCatalog;
use crate::models::PriceForm;

/// Escape text for safe interpolation into HTML content and attributes.
pub fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
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

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n\
         <html lang=\"en\">\n\
         <head>\n\
         <meta charset=\"utf-8\">\n\
         <title>{title}</title>\n\
         </head>\n\
         <body>\n\
         <h1>{title}</h1>\n\
         {body}\n\
         </body>\n\
         </html>\n",
        title = escape(title),
        body = body
    )
}

/// The prediction form, with make and model selects populated from the
/// reference catalog.
pub fn prediction_form_page(catalog: &CarCatalog) -> String {
    let mut make_options = String::new();
    for make in catalog.makes() {
        let escaped = escape(make);
        make_options.push_str(&format!(
            "<option value=\"{escaped}\">{escaped}</option>\n"
        ));
    }

    let mut model_options = String::new();
    for entry in catalog.all() {
        let model = escape(&entry.model);
        let make = escape(&entry.make);
        model_options.push_str(&format!(
            "<option value=\"{model}\">{make} {model}</option>\n"
        ));
    }

    let body = format!(
        "<form method=\"post\" action=\"/predict\">\n\
         <label>Make\n<select name=\"make\">\n{make_options}</select>\n</label>\n\
         <label>Model\n<select name=\"model\">\n{model_options}</select>\n</label>\n\
         <label>Year\n<input type=\"number\" name=\"year\" value=\"2015\" min=\"1951\" required>\n</label>\n\
         <label>Mileage\n<input type=\"number\" name=\"mileage\" value=\"40000\" min=\"0\" step=\"any\" required>\n</label>\n\
         <button type=\"submit\">Estimate price</button>\n\
         </form>"
    );
    layout("Car Price Estimate", &body)
}

/// The result page for a scored submission.
pub fn prediction_result_page(form: &PriceForm, price: f64) -> String {
    let body = format!(
        "<p>A {year} {make} {model} with {mileage:.0} miles is estimated at\n\
         <strong>${price:.2}</strong>.</p>\n\
         <p><a href=\"/\">Estimate another car</a></p>",
        year = form.year,
        make = escape(&form.make),
        model = escape(&form.model),
        mileage = form.mileage,
        price = price
    );
    layout("Estimated Price", &body)
}

/// A user-facing error page; the message is rendered, never the cause chain.
pub fn error_page(message: &str) -> String {
    let body = format!(
        "<p>{}</p>\n<p><a href=\"/\">Back to the form</a></p>",
        escape(message)
    );
    layout("Something Went Wrong", &body)
}
