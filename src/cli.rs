//! Interface de linha de comando do EduConnect baseada em clap.
//!
//! Define a struct [`Cli`] com subcomandos [`Command`] (menu, report, scenarios)
//! e flags globais (--verbose, --no-seed, --config).

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::report::ReportScope;

/// EduConnect: gestão acadêmica de alunos, professores, cursos e turmas.
#[derive(Debug, Parser)]
#[command(name = "educonnect", version, about)]
pub struct Cli {
    /// Subcomando; sem ele, abre o menu interativo.
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Habilita saída detalhada (verbose).
    #[arg(long, short, global = true, default_value_t = false)]
    pub verbose: bool,

    /// Não carrega os dados de demonstração na inicialização.
    #[arg(long, global = true, default_value_t = false)]
    pub no_seed: bool,

    /// Caminho para um arquivo TOML de configuração.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Subcomando efetivo, com `menu` como padrão.
    pub fn command_or_menu(&self) -> Command {
        self.command.clone().unwrap_or(Command::Menu)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Abre o menu interativo.
    Menu,

    /// Imprime um relatório e sai.
    Report {
        /// Qual relatório gerar.
        #[arg(value_enum, default_value_t = ReportArg::General)]
        kind: ReportArg,

        /// Emite JSON em vez de texto.
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Executa os cenários embutidos de sucesso e falha.
    Scenarios,
}

/// Relatório aceito pela CLI, mapeado para [`ReportScope`] internamente.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportArg {
    /// Visão geral do sistema.
    General,
    /// Um relatório por aluno.
    Students,
    /// Um relatório por professor.
    Professors,
    /// Um relatório por curso.
    Courses,
    /// Um relatório por turma.
    Sections,
    /// Notas de cada turma.
    Grades,
    /// Estatísticas de usuários e cursos.
    Stats,
    /// Todos os relatórios.
    All,
}

impl From<ReportArg> for ReportScope {
    fn from(arg: ReportArg) -> Self {
        match arg {
            ReportArg::General => ReportScope::General,
            ReportArg::Students => ReportScope::Students,
            ReportArg::Professors => ReportScope::Professors,
            ReportArg::Courses => ReportScope::Courses,
            ReportArg::Sections => ReportScope::Sections,
            ReportArg::Grades => ReportScope::Grades,
            ReportArg::Stats => ReportScope::Statistics,
            ReportArg::All => ReportScope::All,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_defaults_to_menu() {
        let cli = Cli::parse_from(["educonnect"]);
        assert!(cli.command.is_none());
        assert_eq!(cli.command_or_menu(), Command::Menu);
        assert!(!cli.no_seed);
    }

    #[test]
    fn cli_parses_report_subcommand() {
        let cli = Cli::parse_from(["educonnect", "report", "stats", "--json"]);
        match cli.command_or_menu() {
            Command::Report { kind, json } => {
                assert_eq!(kind, ReportArg::Stats);
                assert!(json);
                assert_eq!(ReportScope::from(kind), ReportScope::Statistics);
            }
            other => panic!("expected Report command, got {other:?}"),
        }
    }

    #[test]
    fn report_kind_defaults_to_general() {
        let cli = Cli::parse_from(["educonnect", "report"]);
        assert_eq!(
            cli.command_or_menu(),
            Command::Report {
                kind: ReportArg::General,
                json: false,
            }
        );
    }

    #[test]
    fn cli_parses_global_flags() {
        let cli = Cli::parse_from([
            "educonnect",
            "scenarios",
            "--no-seed",
            "--config",
            "other.toml",
            "-v",
        ]);
        assert!(cli.verbose);
        assert!(cli.no_seed);
        assert_eq!(cli.config, Some(PathBuf::from("other.toml")));
        assert_eq!(cli.command_or_menu(), Command::Scenarios);
    }

    #[test]
    fn cli_rejects_unknown_report() {
        assert!(Cli::try_parse_from(["educonnect", "report", "payroll"]).is_err());
    }

    #[test]
    fn cli_verify() {
        Cli::command().debug_assert();
    }
}
