//! 対話セッション
//!
//! 1行1コマンドで送信・フィルタ・履歴操作を行う。
//! 履歴はセッション終了時に破棄される。

use crate::error::{AppError, Result};
use crate::files::load_files;
use autoemail_common::view::html::page_html;
use autoemail_common::{
    CategoryFilter, ClassificationTransport, EntryId, Error as CommonError, SubmissionController,
};
use dialoguer::Input;
use std::path::PathBuf;
use tracing::warn;

const HELP: &str = "\
Comandos:
  texto <mensagem>        define o texto a enviar
  arquivos <caminhos...>  seleciona até 10 arquivos
  enviar                  envia texto e arquivos
  filtro <all|categoria>  filtra o resultado atual
  resposta <n>            mostra/oculta a resposta sugerida do item n
  detalhes <n>            mostra/oculta os detalhes da execução #n
  proxima | anterior      navega pelo histórico
  mostrar                 exibe resultado e histórico
  html <arquivo>          grava a página HTML
  ajuda | sair";

/// セッションコマンド
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    Text(String),
    Files(Vec<PathBuf>),
    Submit,
    Filter(CategoryFilter),
    ToggleResponse(usize),
    ToggleDetail(EntryId),
    NextPage,
    PreviousPage,
    Show,
    Html(PathBuf),
    Help,
    Quit,
}

/// 1行をコマンドに変換
pub fn parse_command(line: &str) -> std::result::Result<SessionCommand, String> {
    let line = line.trim();
    let (head, rest) = match line.split_once(char::is_whitespace) {
        Some((head, rest)) => (head, rest.trim()),
        None => (line, ""),
    };

    match head.to_lowercase().as_str() {
        "texto" | "text" => Ok(SessionCommand::Text(rest.to_string())),
        "arquivos" | "files" => Ok(SessionCommand::Files(
            rest.split_whitespace().map(PathBuf::from).collect(),
        )),
        "enviar" | "submit" => Ok(SessionCommand::Submit),
        "filtro" | "filter" => Ok(SessionCommand::Filter(CategoryFilter::parse(rest))),
        "resposta" | "response" => parse_position(rest).map(SessionCommand::ToggleResponse),
        "detalhes" | "details" => rest
            .trim_start_matches('#')
            .parse::<u64>()
            .map(|id| SessionCommand::ToggleDetail(EntryId(id)))
            .map_err(|_| format!("Número de execução inválido: {}", rest)),
        "proxima" | "próxima" | "next" => Ok(SessionCommand::NextPage),
        "anterior" | "prev" => Ok(SessionCommand::PreviousPage),
        "mostrar" | "show" | "" => Ok(SessionCommand::Show),
        "html" if !rest.is_empty() => Ok(SessionCommand::Html(PathBuf::from(rest))),
        "html" => Err("Informe o arquivo de saída".to_string()),
        "ajuda" | "help" | "?" => Ok(SessionCommand::Help),
        "sair" | "quit" | "exit" | "q" => Ok(SessionCommand::Quit),
        other => Err(format!("Comando desconhecido: {}", other)),
    }
}

/// 1始まりの番号を0始まりの位置に
fn parse_position(value: &str) -> std::result::Result<usize, String> {
    match value.parse::<usize>() {
        Ok(n) if n >= 1 => Ok(n - 1),
        _ => Err(format!("Número de item inválido: {}", value)),
    }
}

/// コマンドを1つ実行する。`false` ならセッション終了
pub async fn execute<T: ClassificationTransport>(
    controller: &mut SubmissionController<T>,
    command: SessionCommand,
) -> Result<bool> {
    match command {
        SessionCommand::Text(text) => {
            controller.session_mut().form.set_text(text);
            println!("✔ Texto definido");
        }
        SessionCommand::Files(paths) => {
            let form = &mut controller.session_mut().form;
            match load_files(&paths) {
                Ok(files) => {
                    form.select_files(files)?;
                    let names: Vec<_> = form.files().iter().map(|f| f.name.as_str()).collect();
                    println!("Selecionados: {}", names.join(", "));
                }
                Err(e) => {
                    form.clear_files();
                    return Err(e);
                }
            }
        }
        SessionCommand::Submit => match controller.submit_form().await {
            Ok(outcome) => {
                print!("{}", outcome.current);
                print!("{}", outcome.history);
            }
            Err(CommonError::Transport(_)) => {
                print!("{}", controller.session().render_current());
            }
            Err(e) => return Err(e.into()),
        },
        SessionCommand::Filter(filter) => {
            print!("{}", controller.session_mut().current.set_filter(filter));
        }
        SessionCommand::ToggleResponse(index) => {
            let current = &mut controller.session_mut().current;
            if !current.toggle_response(index) {
                println!("Item {} não existe", index + 1);
            }
            print!("{}", current.render());
        }
        SessionCommand::ToggleDetail(id) => {
            print!("{}", controller.session_mut().toggle_history_detail(id));
        }
        SessionCommand::NextPage => {
            print!("{}", controller.session_mut().next_history_page());
        }
        SessionCommand::PreviousPage => {
            print!("{}", controller.session_mut().previous_history_page());
        }
        SessionCommand::Show => {
            let session = controller.session();
            print!("{}", session.render_current());
            print!("{}", session.render_history());
        }
        SessionCommand::Html(path) => {
            let session = controller.session();
            let html = page_html("AutoEmail", &session.render_current(), &session.render_history());
            std::fs::write(&path, html)?;
            println!("✔ HTML gravado: {}", path.display());
        }
        SessionCommand::Help => println!("{}", HELP),
        SessionCommand::Quit => return Ok(false),
    }
    Ok(true)
}

/// 対話ループ
pub async fn run_interactive<T: ClassificationTransport>(
    controller: &mut SubmissionController<T>,
) -> Result<()> {
    println!("📧 AutoEmail - sessão interativa (digite 'ajuda')\n");

    loop {
        let line: String = Input::new()
            .with_prompt("autoemail")
            .allow_empty(true)
            .interact_text()
            .map_err(|e| AppError::CliExecution(e.to_string()))?;

        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(message) => {
                println!("{}", message);
                continue;
            }
        };

        match execute(controller, command).await {
            Ok(true) => {}
            Ok(false) => break,
            Err(e) => {
                warn!("{}", e);
                println!("✖ {}", e);
            }
        }
    }

    println!("Sessão encerrada; histórico descartado.");
    Ok(())
}
