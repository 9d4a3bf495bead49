//! `pncp options`

use anyhow::Result;
use pncp_lib::dataset::FilterOptions;

use crate::config::AppConfig;

pub async fn run(config: &AppConfig) -> Result<()> {
    let dataset = super::load_dataset(config, &config.export_path()).await?;
    print!("{}", render(&dataset.filter_options()));
    Ok(())
}

fn render(options: &FilterOptions) -> String {
    let mut out = String::new();

    section(&mut out, "Bodies (--body)", &options.bodies);
    section(&mut out, "Municipalities (--municipality)", &options.municipalities);
    section(&mut out, "States (--uf)", &options.ufs);
    section(&mut out, "Modalities (--modality)", &options.modalities);

    let years: Vec<_> = options.years.iter().map(|y| y.to_string()).collect();
    section(&mut out, "Years (--year)", &years);

    match (options.min_value, options.max_value) {
        (Some(min), Some(max)) => {
            out.push_str(&format!("Global value range (--min-value/--max-value)\n  R$ {} to R$ {}\n", min, max));
        }
        _ => out.push_str("Global value range (--min-value/--max-value)\n  (no contracts)\n"),
    }

    out
}

fn section(out: &mut String, title: &str, values: &[String]) {
    out.push_str(title);
    out.push('\n');
    if values.is_empty() {
        out.push_str("  (none)\n");
    }
    for value in values {
        out.push_str("  ");
        out.push_str(value);
        out.push('\n');
    }
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn test_render_options() {
        let options = FilterOptions {
            bodies: vec!["Prefeitura de Recife".to_string()],
            ufs: vec!["PE".to_string(), "RN".to_string()],
            years: vec![2022, 2023],
            min_value: Some(Decimal::from(10)),
            max_value: Some(Decimal::from(2000)),
            ..FilterOptions::default()
        };

        let text = render(&options);

        assert!(text.contains("Bodies (--body)\n  Prefeitura de Recife\n"));
        assert!(text.contains("Municipalities (--municipality)\n  (none)\n"));
        assert!(text.contains("States (--uf)\n  PE\n  RN\n"));
        assert!(text.contains("Years (--year)\n  2022\n  2023\n"));
        assert!(text.contains("R$ 10 to R$ 2000"));
    }

    #[test]
    fn test_render_empty_options() {
        let text = render(&FilterOptions::default());
        assert!(text.contains("(no contracts)"));
    }
}
