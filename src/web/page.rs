//! Dashboard page markup.
//!
//! One input per entry of `FIELDS`, the two action buttons, a prediction
//! line and the chart. The page script posts to `/api/fill` and
//! `/api/predict` and redraws the chart with plotly.js.

use crate::domain::{Figure, FIELDS};

/// Inputs per form row.
const FIELDS_PER_ROW: usize = 5;

const PLOTLY_SRC: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";

fn render_inputs() -> String {
    FIELDS
        .chunks(FIELDS_PER_ROW)
        .map(|row| {
            let inputs: String = row
                .iter()
                .map(|f| {
                    format!(
                        r#"<input class="param" id="{id}-input" data-field="{id}" placeholder="{id}" title="{hint}">"#,
                        id = f.id,
                        hint = f.hint
                    )
                })
                .collect();
            format!(r#"<div class="param-row">{inputs}</div>"#)
        })
        .collect()
}

/// Render the full page with `figure` as the initial chart.
///
/// # Errors
/// Returns error if the figure cannot be serialized.
pub fn render_page(figure: &Figure) -> Result<String, serde_json::Error> {
    // `</` must not appear inside an inline script element.
    let figure_json = serde_json::to_string(figure)?.replace("</", "<\\/");
    let inputs = render_inputs();

    Ok(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>Heart disease predictions</title>
    <link rel="icon" href="/favicon.ico">
    <link rel="stylesheet" href="/static/style.css">
    <script src="{PLOTLY_SRC}"></script>
</head>
<body>
    <h1>Heart disease predictions</h1>
    <div id="params-container">{inputs}</div>
    <div id="buttons-container">
        <button id="fill-button">Fill!</button>
        <button id="predict-button">Predict!</button>
    </div>
    <div id="prediction-container"></div>
    <div id="plot-container"><div id="plot"></div></div>
    <script id="initial-figure" type="application/json">{figure_json}</script>
    <script>
    (function () {{
        const plot = document.getElementById("plot");
        const output = document.getElementById("prediction-container");
        const inputs = Array.from(document.querySelectorAll("input.param"));
        const clicks = {{ fill: 0, predict: 0 }};

        const initial = JSON.parse(document.getElementById("initial-figure").textContent);
        Plotly.newPlot(plot, initial.data, initial.layout);

        async function post(path, body) {{
            const res = await fetch(path, {{
                method: "POST",
                headers: {{ "Content-Type": "application/json" }},
                body: JSON.stringify(body),
            }});
            const json = await res.json().catch(() => ({{}}));
            if (!res.ok) {{
                throw new Error(json.error || res.statusText);
            }}
            return json;
        }}

        function showError(err) {{
            output.textContent = err.message;
            output.className = "error";
        }}

        document.getElementById("fill-button").addEventListener("click", async () => {{
            clicks.fill += 1;
            try {{
                const res = await post("/api/fill", {{ n_clicks: clicks.fill }});
                for (const input of inputs) {{
                    const value = res.values[input.dataset.field];
                    if (value !== undefined) {{
                        input.value = value;
                    }}
                }}
            }} catch (err) {{
                showError(err);
            }}
        }});

        document.getElementById("predict-button").addEventListener("click", async () => {{
            clicks.predict += 1;
            const values = {{}};
            for (const input of inputs) {{
                values[input.dataset.field] = input.value;
            }}
            try {{
                const res = await post("/api/predict", {{ n_clicks: clicks.predict, values }});
                if (res.figure) {{
                    Plotly.react(plot, res.figure.data, res.figure.layout);
                    output.textContent = res.summary;
                    output.className = "";
                }}
            }} catch (err) {{
                showError(err);
            }}
        }});
    }})();
    </script>
</body>
</html>
"#
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::chart::Layout;

    #[test]
    fn test_page_has_one_input_per_field() {
        let page = render_page(&Figure {
            data: vec![],
            layout: Layout::default(),
        })
        .expect("render");

        assert_eq!(page.matches(r#"class="param""#).count(), FIELDS.len());
        for f in FIELDS {
            assert!(page.contains(&format!(r#"id="{}-input""#, f.id)));
        }
        assert_eq!(page.matches(r#"class="param-row""#).count(), 3);
        assert!(page.contains("Fill!"));
        assert!(page.contains("Predict!"));
    }

    #[test]
    fn test_figure_json_cannot_close_script() {
        let mut layout = Layout::default();
        layout.xaxis.title.text = "</script>".into();
        let page = render_page(&Figure { data: vec![], layout }).expect("render");
        assert!(!page.contains(r#""</script>""#));
        assert!(page.contains(r#"<\/script>"#));
    }

    #[test]
    fn test_both_buttons_report_request_failures() {
        let page = render_page(&Figure {
            data: vec![],
            layout: Layout::default(),
        })
        .expect("render");

        assert_eq!(page.matches("showError(err);").count(), 2);
        assert!(page.contains(r#"post("/api/fill""#));
    }
}
