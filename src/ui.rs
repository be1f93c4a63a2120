//! Interface de terminal do EduConnect: banners e saída colorida.
//!
//! Usa a crate `console` para estilização com cores. O [`Ui`] escreve em
//! qualquer [`Write`], o que permite capturar a saída em testes.

use std::io::{self, Write};

use console::Style;

use crate::report::{Render, Report};
use crate::scenarios::ScenarioVerdict;
use crate::service::Outcome;

/// Estilos e largura usados para toda a saída do terminal.
///
/// Sucesso é mostrado em verde, falha em vermelho e títulos em ciano.
pub struct Ui {
    // Estilo verde para mensagens de sucesso.
    green: Style,
    // Estilo vermelho para mensagens de falha.
    red: Style,
    // Estilo amarelo para avisos e detalhes.
    yellow: Style,
    // Estilo ciano para banners.
    cyan: Style,
    // Largura das linhas separadoras.
    width: usize,
}

impl Ui {
    /// Estilos que seguem a detecção de cores do terminal.
    pub fn new(width: usize) -> Self {
        Self::with_styling(width, None)
    }

    /// Sem códigos ANSI, para saída redirecionada e testes.
    pub fn plain(width: usize) -> Self {
        Self::with_styling(width, Some(false))
    }

    fn with_styling(width: usize, force: Option<bool>) -> Self {
        let style = |s: Style| match force {
            Some(value) => s.force_styling(value),
            None => s,
        };
        Self {
            green: style(Style::new().green().bold()),
            red: style(Style::new().red().bold()),
            yellow: style(Style::new().yellow()),
            cyan: style(Style::new().cyan().bold()),
            width: width.max(10),
        }
    }

    pub fn separator(&self, out: &mut impl Write) -> io::Result<()> {
        writeln!(out, "{}", "-".repeat(self.width))
    }

    /// Título entre duas linhas de `=`.
    pub fn banner(&self, out: &mut impl Write, title: &str) -> io::Result<()> {
        let rule = "=".repeat(self.width);
        writeln!(out, "{rule}")?;
        writeln!(out, "{}", self.cyan.apply_to(title))?;
        writeln!(out, "{rule}")
    }

    pub fn success(&self, out: &mut impl Write, message: &str) -> io::Result<()> {
        writeln!(out, "{} {message}", self.green.apply_to("✓"))
    }

    pub fn failure(&self, out: &mut impl Write, message: &str) -> io::Result<()> {
        writeln!(out, "{} {message}", self.red.apply_to("✗"))
    }

    /// Mensagem do resultado; falhas com mais de um detalhe listam cada um.
    pub fn outcome<T>(&self, out: &mut impl Write, outcome: &Outcome<T>) -> io::Result<()> {
        if outcome.is_success() {
            return self.success(out, outcome.message());
        }
        self.failure(out, outcome.message())?;
        if outcome.details().len() > 1 {
            for detail in outcome.details() {
                writeln!(out, "  {} {detail}", self.yellow.apply_to("-"))?;
            }
        }
        Ok(())
    }

    pub fn report(&self, out: &mut impl Write, report: &Report) -> io::Result<()> {
        self.banner(out, &report.title())?;
        write!(out, "{}", report.body())?;
        self.separator(out)
    }

    pub fn verdict(&self, out: &mut impl Write, verdict: &ScenarioVerdict) -> io::Result<()> {
        if verdict.passed {
            writeln!(
                out,
                "{} PASSED {}: {}",
                self.green.apply_to("✓"),
                verdict.name,
                verdict.message
            )
        } else {
            writeln!(
                out,
                "{} FAILED {}: {}",
                self.red.apply_to("✗"),
                verdict.name,
                verdict.message
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validator::Validation;

    fn render(f: impl FnOnce(&Ui, &mut Vec<u8>) -> io::Result<()>) -> String {
        let ui = Ui::plain(20);
        let mut out = Vec::new();
        f(&ui, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn banner_uses_configured_width() {
        let text = render(|ui, out| ui.banner(out, "TITLE"));
        let rule = "=".repeat(20);
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines, vec![rule.as_str(), "TITLE", rule.as_str()]);
    }

    #[test]
    fn failure_outcome_lists_every_detail() {
        let outcome: Outcome<()> = Outcome::from_validation(
            "Could not register",
            Validation::fail_all(vec!["a".into(), "b".into()]),
        );
        let text = render(|ui, out| ui.outcome(out, &outcome));
        assert!(text.starts_with("✗ Could not register: a, b"));
        assert!(text.contains("  - a\n"));
        assert!(text.contains("  - b\n"));
    }

    #[test]
    fn single_detail_failure_is_one_line() {
        let outcome: Outcome<()> = Outcome::failure("Section not found");
        let text = render(|ui, out| ui.outcome(out, &outcome));
        assert_eq!(text, "✗ Section not found\n");
    }

    #[test]
    fn verdict_shows_pass_or_fail() {
        let verdict = ScenarioVerdict {
            name: "demo",
            passed: false,
            message: "boom".into(),
        };
        assert_eq!(
            render(|ui, out| ui.verdict(out, &verdict)),
            "✗ FAILED demo: boom\n"
        );
    }
}
