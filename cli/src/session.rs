//! Interactive console session.
//!
//! Owns the readline loop, command dispatch, and the wiring between the
//! sales-link client, the session monitor, the alert hub, and the loading
//! gate. Every completed readline counts as user activity for the monitor;
//! a background task runs the inactivity check on a fixed interval so a
//! stale session ends even while the prompt sits idle.

use clap::ValueEnum;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use sales_link::{Page, SalesClient};
use serde::Serialize;
use serde_json::Value;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tokio::task::JoinHandle;
use tokio::time::Duration;

use crate::alerts::{render_alert, AlertHub};
use crate::config::ConsoleConfig;
use crate::error::{CLIError, Result};
use crate::format::{currency_brl, date_br, CellFormat};
use crate::loader::{with_gate, LoadingGate};
use crate::monitor::{MonitorState, SessionMonitor, TickOutcome};
use crate::store::SessionStore;
use crate::table::{
    Align, Column, PageEvent, Row, RowAction, ServerPagedTable, Tone, DEFAULT_RENDER_WIDTH,
};

/// Output format for listings
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

/// The paginated resource currently open in the console
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Resource {
    Customers,
    Products,
    Sales,
}

impl Resource {
    fn columns(self) -> Vec<Column> {
        match self {
            Resource::Customers => vec![
                Column::new("code", "Código"),
                Column::new("fullName", "Nome").sortable(),
                Column::new("cpf", "CPF"),
                Column::new("cellPhone", "Celular"),
                Column::new("email", "E-mail"),
                Column::new("createdAt", "Cadastro").format(CellFormat::Date),
            ],
            Resource::Products => vec![
                Column::new("code", "Código"),
                Column::new("name", "Nome").sortable(),
                Column::new("type", "Tipo").format(CellFormat::ProductType),
                Column::new("salePrice", "Preço")
                    .format(CellFormat::Currency)
                    .align(Align::Right)
                    .sortable(),
                Column::new("stockQuantity", "Estoque")
                    .align(Align::Right)
                    .sortable(),
            ],
            Resource::Sales => vec![
                Column::new("code", "Código"),
                Column::new("customerName", "Cliente").sortable(),
                Column::new("paymentMethod", "Pagamento").format(CellFormat::PaymentMethod),
                Column::new("totalAmount", "Total")
                    .format(CellFormat::Currency)
                    .align(Align::Right)
                    .sortable(),
                Column::new("createdAt", "Data").format(CellFormat::Date),
            ],
        }
    }

    /// Actions shown in the table footer legend, matching the entity's
    /// shell verbs (get / update / delete).
    fn actions(self) -> Vec<RowAction> {
        match self {
            Resource::Customers | Resource::Products => vec![
                RowAction::new("Ver (get)", Tone::View),
                RowAction::new("Editar (update)", Tone::Edit),
                RowAction::new("Remover (delete)", Tone::Remove),
            ],
            Resource::Sales => vec![
                RowAction::new("Ver (get)", Tone::View),
                RowAction::new("Remover (delete)", Tone::Remove),
            ],
        }
    }

    fn label(self) -> &'static str {
        match self {
            Resource::Customers => "clientes",
            Resource::Products => "produtos",
            Resource::Sales => "vendas",
        }
    }
}

struct OpenTable {
    resource: Resource,
    filter: String,
    table: ServerPagedTable,
}

/// Console session state
pub struct ConsoleSession {
    client: SalesClient,
    store: Arc<Mutex<SessionStore>>,
    monitor: Arc<Mutex<SessionMonitor>>,
    alerts: AlertHub,
    loader: LoadingGate,
    config: ConsoleConfig,
    format: OutputFormat,
    color: bool,
    animations: bool,
    open_table: Option<OpenTable>,
}

impl ConsoleSession {
    pub fn new(
        client: SalesClient,
        store: SessionStore,
        config: ConsoleConfig,
        format: OutputFormat,
        color: bool,
        animations: bool,
    ) -> Self {
        let session_cfg = config.resolved_session();
        let mut monitor = SessionMonitor::new(session_cfg.inactivity_timeout_minutes);
        if SessionMonitor::is_authenticated(&store) {
            monitor.start();
        }

        Self {
            client,
            store: Arc::new(Mutex::new(store)),
            monitor: Arc::new(Mutex::new(monitor)),
            alerts: AlertHub::new(),
            loader: LoadingGate::new(),
            config,
            format,
            color,
            animations,
            open_table: None,
        }
    }

    pub fn alerts(&self) -> &AlertHub {
        &self.alerts
    }

    /// Periodic inactivity check. Prints fresh alerts itself so an expiry
    /// is visible while the prompt sits idle.
    fn spawn_monitor_task(&self) -> JoinHandle<()> {
        let monitor = Arc::clone(&self.monitor);
        let store = Arc::clone(&self.store);
        let alerts = self.alerts.clone();
        let color = self.color;
        let interval = self
            .config
            .resolved_session()
            .check_interval_secs;

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(Duration::from_secs(interval.max(1)));
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
            loop {
                ticker.tick().await;
                let outcome = {
                    let mut monitor = monitor.lock().unwrap();
                    let mut store = store.lock().unwrap();
                    monitor.tick(&mut store, &alerts)
                };
                if outcome == TickOutcome::Expired {
                    for alert in alerts.take_unprinted() {
                        eprintln!("\n{}", render_alert(&alert, color));
                    }
                }
            }
        })
    }

    /// Spinner follows the loading gate's visibility transitions
    fn spawn_spinner_task(&self) -> JoinHandle<()> {
        let mut visible = self.loader.subscribe();
        tokio::spawn(async move {
            let mut spinner: Option<ProgressBar> = None;
            while visible.changed().await.is_ok() {
                if *visible.borrow() {
                    if spinner.is_none() {
                        let pb = ProgressBar::new_spinner();
                        if let Ok(style) = ProgressStyle::default_spinner()
                            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"])
                            .template("{spinner:.cyan} {msg}")
                        {
                            pb.set_style(style);
                        }
                        pb.set_message("Carregando...");
                        pb.enable_steady_tick(Duration::from_millis(80));
                        spinner = Some(pb);
                    }
                } else if let Some(pb) = spinner.take() {
                    pb.finish_and_clear();
                }
            }
        })
    }

    fn print_banner(&self) {
        println!();
        println!(
            "  {}",
            "Sales Console - Terminal administrativo".bold()
        );
        let user = self.store.lock().unwrap().current_user();
        match user {
            Some(u) => println!("  Conectado como {}", u.full_name.cyan()),
            None => println!("  {}", "Nenhuma sessão ativa. Use: login <email>".dimmed()),
        }
        println!(
            "  Digite {} para ver os comandos, {} para sair",
            "help".cyan().bold(),
            "exit".cyan().bold()
        );
        println!();
    }

    fn prompt(&self) -> String {
        let authenticated = {
            let store = self.store.lock().unwrap();
            SessionMonitor::is_authenticated(&store)
        };
        let status = if authenticated {
            "●".green().to_string()
        } else {
            "○".yellow().to_string()
        };
        if self.color {
            format!("{} {} ", status, "vendas❯".bright_blue().bold())
        } else if authenticated {
            "* vendas> ".to_string()
        } else {
            "o vendas> ".to_string()
        }
    }

    /// Run the interactive readline loop
    pub async fn run_interactive(&mut self) -> Result<()> {
        self.print_banner();

        let monitor_task = self.spawn_monitor_task();
        let spinner_task = if self.animations {
            Some(self.spawn_spinner_task())
        } else {
            None
        };

        let mut rl = DefaultEditor::new()?;

        loop {
            // Anything posted since the last command (expiry warnings print
            // from the monitor task; everything else lands here)
            for alert in self.alerts.take_unprinted() {
                println!("{}", render_alert(&alert, self.color));
            }

            match rl.readline(&self.prompt()) {
                Ok(line) => {
                    let line = line.trim().to_string();
                    if line.is_empty() {
                        continue;
                    }
                    // A completed readline is a qualifying interaction
                    self.monitor.lock().unwrap().record_activity();
                    let _ = rl.add_history_entry(&line);

                    if matches!(line.as_str(), "exit" | "quit" | "\\q") {
                        println!("{}", "Até logo!".cyan());
                        break;
                    }

                    if let Err(e) = self.execute_line(&line).await {
                        self.handle_error(e);
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    println!("{}", "Use exit para sair".dimmed());
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    println!("\n{}", "Até logo!".cyan());
                    break;
                }
                Err(err) => {
                    eprintln!("{}", format!("✖ {err}").red());
                    break;
                }
            }
        }

        monitor_task.abort();
        if let Some(task) = spinner_task {
            task.abort();
        }
        Ok(())
    }

    /// Execute one or more semicolon-separated commands (single-shot mode)
    pub async fn execute_batch(&mut self, input: &str) -> Result<()> {
        for command in input.split(';') {
            let command = command.trim();
            if command.is_empty() {
                continue;
            }
            self.execute_line(command).await?;
            for alert in self.alerts.take_unprinted() {
                println!("{}", render_alert(&alert, self.color));
            }
        }
        Ok(())
    }

    async fn execute_line(&mut self, line: &str) -> Result<()> {
        let parts: Vec<&str> = line.split_whitespace().collect();
        let (head, rest) = match parts.split_first() {
            Some((h, r)) => (*h, r),
            None => return Ok(()),
        };

        match head {
            "help" => {
                self.print_help();
                Ok(())
            }
            "login" => self.cmd_login(rest).await,
            "logout" => self.cmd_logout().await,
            "whoami" => self.cmd_whoami(),
            "theme" => self.cmd_theme(rest),
            "customers" | "clientes" => self.cmd_resource(Resource::Customers, rest).await,
            "products" | "produtos" => self.cmd_resource(Resource::Products, rest).await,
            "sales" | "vendas" => self.cmd_resource(Resource::Sales, rest).await,
            "dashboard" => self.cmd_dashboard().await,
            "reports" | "relatorios" => self.cmd_reports(rest).await,
            "next" | "prev" | "page" | "sort" => self.cmd_navigate(head, rest).await,
            other => Err(CLIError::Parse(format!(
                "Comando desconhecido: '{other}'. Digite help."
            ))),
        }
    }

    fn print_help(&self) {
        let lines = [
            ("login <email>", "autentica e inicia o monitor de sessão"),
            ("logout", "encerra a sessão local e no servidor"),
            ("whoami", "mostra o usuário autenticado"),
            ("customers [filtro]", "lista clientes paginados"),
            ("customers get <código>", "detalha um cliente"),
            ("customers create <arquivo.json>", "cadastra a partir de um JSON"),
            ("customers update <id> <arquivo.json>", "atualiza"),
            ("customers delete <id>", "remove"),
            ("products / sales", "mesmos subcomandos de customers"),
            ("dashboard", "estatísticas e vendas recentes"),
            ("reports revenue <AAAA-MM-DD>", "receita dos últimos 12 meses"),
            ("reports top-products", "produtos com maior receita"),
            ("reports oldest-products", "produtos mais antigos em estoque"),
            ("reports new-customers <ano>", "novos clientes por mês"),
            ("next / prev / page <n>", "navega na tabela aberta"),
            ("sort <coluna>", "ordena a tabela aberta"),
            ("theme light|dark", "preferência de tema"),
            ("exit", "sai do console"),
        ];
        println!();
        for (cmd, desc) in lines {
            println!("  {:<38} {}", cmd.cyan(), desc);
        }
        println!();
    }

    async fn cmd_login(&mut self, args: &[&str]) -> Result<()> {
        let email = args
            .first()
            .copied()
            .ok_or_else(|| CLIError::Parse("Uso: login <email>".into()))?;
        let password = rpassword::prompt_password("Senha: ")
            .map_err(|e| CLIError::Readline(e.to_string()))?;
        if password.is_empty() {
            return Err(CLIError::Cancelled);
        }

        let response = with_gate(&self.loader, self.client.login(email, &password)).await?;

        self.client.authorize(&response.access_token);
        {
            let mut store = self.store.lock().unwrap();
            store.set_session(&response.access_token, response.user.as_ref())?;
        }
        self.monitor.lock().unwrap().start();

        let name = response
            .user
            .as_ref()
            .map(|u| u.full_name.clone())
            .unwrap_or_else(|| email.to_string());
        self.alerts.success(format!("Bem-vindo(a), {name}!"));
        Ok(())
    }

    async fn cmd_logout(&mut self) -> Result<()> {
        // Server-side invalidation is best effort; local state clears anyway
        if self.client.has_credentials() {
            if let Err(e) = with_gate(&self.loader, self.client.logout()).await {
                log::debug!("[SESSION] server logout failed: {e}");
            }
        }
        self.client.deauthorize();
        {
            let mut monitor = self.monitor.lock().unwrap();
            let mut store = self.store.lock().unwrap();
            monitor.logout(&mut store);
        }
        self.open_table = None;
        self.alerts.info("Sessão encerrada.");
        Ok(())
    }

    fn cmd_whoami(&self) -> Result<()> {
        let store = self.store.lock().unwrap();
        match store.current_user() {
            Some(user) => {
                println!("{} <{}>", user.full_name.bold(), user.email);
                println!("Perfil: {}", user.role);
            }
            None if store.token().is_some() => {
                println!("Sessão ativa sem dados do usuário");
            }
            None => println!("{}", "Nenhuma sessão ativa".dimmed()),
        }
        Ok(())
    }

    fn cmd_theme(&mut self, args: &[&str]) -> Result<()> {
        match args.first().copied() {
            Some(theme @ ("light" | "dark")) => {
                self.store.lock().unwrap().set_theme(theme)?;
                self.alerts.success(format!("Tema alterado para {theme}."));
                Ok(())
            }
            Some(other) => Err(CLIError::Parse(format!(
                "Tema inválido: '{other}'. Use light ou dark."
            ))),
            None => {
                let store = self.store.lock().unwrap();
                println!("Tema atual: {}", store.theme().unwrap_or("light"));
                Ok(())
            }
        }
    }

    fn require_session(&mut self) -> Result<()> {
        let live = {
            let store = self.store.lock().unwrap();
            SessionMonitor::is_authenticated(&store)
        };
        if !live {
            self.client.deauthorize();
            return Err(CLIError::Parse(
                "Faça login para continuar (login <email>).".into(),
            ));
        }
        Ok(())
    }

    async fn cmd_resource(&mut self, resource: Resource, args: &[&str]) -> Result<()> {
        self.require_session()?;
        match args.split_first() {
            Some((&"get", rest)) => {
                let code = rest
                    .first()
                    .copied()
                    .ok_or_else(|| CLIError::Parse("Uso: <recurso> get <código>".into()))?;
                self.show_by_code(resource, code).await
            }
            Some((&"create", rest)) => {
                let file = rest
                    .first()
                    .copied()
                    .ok_or_else(|| CLIError::Parse("Uso: <recurso> create <arquivo.json>".into()))?;
                self.create_from_file(resource, Path::new(file)).await
            }
            Some((&"update", rest)) => {
                let (id, file) = match rest {
                    [id, file, ..] => (*id, *file),
                    _ => {
                        return Err(CLIError::Parse(
                            "Uso: <recurso> update <id> <arquivo.json>".into(),
                        ))
                    }
                };
                let id: i64 = id
                    .parse()
                    .map_err(|_| CLIError::Parse(format!("Id inválido: '{id}'")))?;
                self.update_from_file(resource, id, Path::new(file)).await
            }
            Some((&"delete", rest)) => {
                let id = rest
                    .first()
                    .copied()
                    .ok_or_else(|| CLIError::Parse("Uso: <recurso> delete <id>".into()))?;
                let id: i64 = id
                    .parse()
                    .map_err(|_| CLIError::Parse(format!("Id inválido: '{id}'")))?;
                self.delete_by_id(resource, id).await
            }
            // anything else is a search filter
            _ => {
                let filter = args.join(" ");
                self.open_resource(resource, filter).await
            }
        }
    }

    async fn open_resource(&mut self, resource: Resource, filter: String) -> Result<()> {
        let page_size = self.config.resolved_ui().page_size;
        let mut table = ServerPagedTable::new(resource.columns(), page_size)
            .with_actions(resource.actions());
        table.set_truncate(self.config.resolved_ui().truncate);

        let (rows, total) = self.fetch_rows(resource, &filter, 0, page_size).await?;
        table.set_page(rows, total);

        self.open_table = Some(OpenTable {
            resource,
            filter,
            table,
        });
        self.render_open_table();
        Ok(())
    }

    async fn cmd_navigate(&mut self, verb: &str, args: &[&str]) -> Result<()> {
        let open = match self.open_table.take() {
            Some(open) => open,
            None => {
                return Err(CLIError::Parse(
                    "Nenhuma tabela aberta. Liste um recurso primeiro.".into(),
                ))
            }
        };
        let mut open = open;
        let prior_page = open.table.page_index();

        let event: Option<PageEvent> = match verb {
            "next" => open.table.next(),
            "prev" => open.table.prev(),
            "page" => match args.first().and_then(|s| s.parse::<u32>().ok()) {
                Some(n) => open.table.select_page(n),
                None => {
                    self.open_table = Some(open);
                    return Err(CLIError::Parse("Uso: page <número>".into()));
                }
            },
            "sort" => match args.first().copied() {
                Some(key) => match open.table.sort_by(key) {
                    Some(_) => None,
                    None => {
                        self.open_table = Some(open);
                        return Err(CLIError::Parse(format!(
                            "Coluna não ordenável: '{key}'"
                        )));
                    }
                },
                None => {
                    self.open_table = Some(open);
                    return Err(CLIError::Parse("Uso: sort <coluna>".into()));
                }
            },
            _ => None,
        };

        if let Some(event) = event {
            match self
                .fetch_rows(
                    open.resource,
                    &open.filter,
                    event.page_index,
                    event.page_size,
                )
                .await
            {
                Ok((rows, total)) => open.table.set_page(rows, total),
                Err(e) => {
                    // keep index and rows consistent: the advanced page was
                    // never fetched
                    let _ = open.table.select_page(prior_page + 1);
                    self.open_table = Some(open);
                    return Err(e);
                }
            }
        }

        self.open_table = Some(open);
        self.render_open_table();
        Ok(())
    }

    fn render_open_table(&self) {
        if let Some(open) = &self.open_table {
            match self.format {
                OutputFormat::Table => {
                    print!("{}", open.table.render(Some(DEFAULT_RENDER_WIDTH), self.color));
                }
                OutputFormat::Json => {
                    let rows: Vec<Value> =
                        open.table.rows().iter().cloned().map(Value::Object).collect();
                    match serde_json::to_string_pretty(&rows) {
                        Ok(json) => println!("{json}"),
                        Err(e) => eprintln!("{}", format!("✖ {e}").red()),
                    }
                }
            }
        }
    }

    async fn fetch_rows(
        &self,
        resource: Resource,
        filter: &str,
        page: u32,
        size: u32,
    ) -> Result<(Vec<Row>, u64)> {
        let result = match resource {
            Resource::Customers => {
                let page = with_gate(
                    &self.loader,
                    self.client.customers().search(filter, page, size),
                )
                .await?;
                page_to_rows(&page)
            }
            Resource::Products => {
                let page = with_gate(
                    &self.loader,
                    self.client.products().search(filter, page, size),
                )
                .await?;
                page_to_rows(&page)
            }
            Resource::Sales => {
                let page = with_gate(
                    &self.loader,
                    self.client.sales().search(filter, page, size),
                )
                .await?;
                page_to_rows(&page)
            }
        };
        log::debug!(
            "[SESSION] fetched page {page} of {} ({} total)",
            resource.label(),
            result.1
        );
        Ok(result)
    }

    async fn show_by_code(&mut self, resource: Resource, code: &str) -> Result<()> {
        let value = match resource {
            Resource::Customers => serde_json::to_value(
                with_gate(&self.loader, self.client.customers().get_by_code(code)).await?,
            )?,
            Resource::Products => serde_json::to_value(
                with_gate(&self.loader, self.client.products().get_by_code(code)).await?,
            )?,
            Resource::Sales => serde_json::to_value(
                with_gate(&self.loader, self.client.sales().get_by_code(code)).await?,
            )?,
        };
        self.print_detail(&value);
        Ok(())
    }

    async fn create_from_file(&mut self, resource: Resource, file: &Path) -> Result<()> {
        let payload = std::fs::read_to_string(file)
            .map_err(|e| CLIError::File(format!("Não foi possível ler '{}': {e}", file.display())))?;

        match resource {
            Resource::Customers => {
                let request = serde_json::from_str(&payload)?;
                with_gate(&self.loader, self.client.customers().create(&request)).await?;
            }
            Resource::Products => {
                let request = serde_json::from_str(&payload)?;
                with_gate(&self.loader, self.client.products().create(&request)).await?;
            }
            Resource::Sales => {
                let request = serde_json::from_str(&payload)?;
                with_gate(&self.loader, self.client.sales().create(&request)).await?;
            }
        }
        self.alerts.success("Registro criado com sucesso.");
        self.refresh_open_table().await
    }

    async fn update_from_file(&mut self, resource: Resource, id: i64, file: &Path) -> Result<()> {
        let payload = std::fs::read_to_string(file)
            .map_err(|e| CLIError::File(format!("Não foi possível ler '{}': {e}", file.display())))?;

        match resource {
            Resource::Customers => {
                let request = serde_json::from_str(&payload)?;
                with_gate(&self.loader, self.client.customers().update(id, &request)).await?;
            }
            Resource::Products => {
                let request = serde_json::from_str(&payload)?;
                with_gate(&self.loader, self.client.products().update(id, &request)).await?;
            }
            Resource::Sales => {
                let request = serde_json::from_str(&payload)?;
                with_gate(&self.loader, self.client.sales().update(id, &request)).await?;
            }
        }
        self.alerts.success("Registro atualizado com sucesso.");
        self.refresh_open_table().await
    }

    async fn delete_by_id(&mut self, resource: Resource, id: i64) -> Result<()> {
        match resource {
            Resource::Customers => {
                with_gate(&self.loader, self.client.customers().delete(id)).await?
            }
            Resource::Products => {
                with_gate(&self.loader, self.client.products().delete(id)).await?
            }
            Resource::Sales => with_gate(&self.loader, self.client.sales().delete(id)).await?,
        }
        self.alerts.success("Registro removido.");
        self.refresh_open_table().await
    }

    /// Refetch the open table after a mutation; the total may have shrunk
    /// below the current page, which `set_page` clamps.
    async fn refresh_open_table(&mut self) -> Result<()> {
        if let Some(mut open) = self.open_table.take() {
            let (rows, total) = self
                .fetch_rows(
                    open.resource,
                    &open.filter,
                    open.table.page_index(),
                    open.table.page_size(),
                )
                .await?;
            open.table.set_page(rows, total);
            self.open_table = Some(open);
            self.render_open_table();
        }
        Ok(())
    }

    async fn cmd_dashboard(&mut self) -> Result<()> {
        self.require_session()?;

        let stats = with_gate(&self.loader, self.client.dashboard().stats()).await?;
        let recent = with_gate(&self.loader, self.client.dashboard().recent_sales(5)).await?;

        if matches!(self.format, OutputFormat::Json) {
            println!(
                "{}",
                serde_json::to_string_pretty(&serde_json::json!({
                    "stats": stats,
                    "recentSales": recent,
                }))?
            );
            return Ok(());
        }

        println!();
        println!(
            "  Receita total: {} ({:+.1}%)",
            currency_brl(stats.total_revenue).bold(),
            stats.revenue_variation
        );
        println!(
            "  Vendas:        {} ({:+.1}%)",
            stats.total_sales, stats.sales_variation
        );
        println!(
            "  Clientes:      {} ({:+.1}%)",
            stats.total_customers, stats.customers_variation
        );
        println!("  Produtos:      {}", stats.total_products);
        if !recent.sales.is_empty() {
            println!();
            println!("  {}", "Vendas recentes".bold());
            for sale in &recent.sales {
                println!(
                    "  {}  {:<30} {:>12}  {}",
                    sale.code,
                    sale.customer_name,
                    currency_brl(sale.total_amount),
                    date_br(&sale.sale_date)
                );
            }
        }
        println!();
        Ok(())
    }

    async fn cmd_reports(&mut self, args: &[&str]) -> Result<()> {
        self.require_session()?;
        match args.split_first() {
            Some((&"revenue", rest)) => {
                let date = rest.first().copied().ok_or_else(|| {
                    CLIError::Parse("Uso: reports revenue <AAAA-MM-DD>".into())
                })?;
                let report =
                    with_gate(&self.loader, self.client.reports().monthly_revenue(date)).await?;
                self.print_report(&report)
            }
            Some((&"top-products", _)) => {
                let report =
                    with_gate(&self.loader, self.client.reports().top_revenue_products()).await?;
                self.print_report(&report)
            }
            Some((&"oldest-products", _)) => {
                let report =
                    with_gate(&self.loader, self.client.reports().oldest_products()).await?;
                self.print_report(&report)
            }
            Some((&"new-customers", rest)) => {
                let year: i32 = rest
                    .first()
                    .and_then(|s| s.parse().ok())
                    .ok_or_else(|| CLIError::Parse("Uso: reports new-customers <ano>".into()))?;
                let report =
                    with_gate(&self.loader, self.client.reports().new_customers(year)).await?;
                self.print_report(&report)
            }
            _ => Err(CLIError::Parse(
                "Uso: reports revenue|top-products|oldest-products|new-customers".into(),
            )),
        }
    }

    fn print_report<T: Serialize>(&self, report: &T) -> Result<()> {
        let value = serde_json::to_value(report)?;
        match self.format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&value)?),
            OutputFormat::Table => self.print_detail(&value),
        }
        Ok(())
    }

    /// Generic detail view: top-level scalars as "label: value" lines,
    /// arrays of objects as indented blocks.
    fn print_detail(&self, value: &Value) {
        match value {
            Value::Object(map) => {
                println!();
                for (key, v) in map {
                    match v {
                        Value::Array(items) => {
                            println!("  {}:", key.bold());
                            for item in items {
                                println!("    {}", compact_line(item));
                            }
                        }
                        Value::Object(_) => {
                            println!("  {}: {}", key.bold(), compact_line(v));
                        }
                        other => println!("  {}: {}", key.bold(), scalar_text(other)),
                    }
                }
                println!();
            }
            other => println!("{other}"),
        }
    }

    fn handle_error(&mut self, error: CLIError) {
        if error.is_unauthorized() {
            // Token rejected server-side: drop local session and go idle
            self.client.deauthorize();
            let mut monitor = self.monitor.lock().unwrap();
            let mut store = self.store.lock().unwrap();
            monitor.logout(&mut store);
            drop(store);
            drop(monitor);
            self.open_table = None;
        }
        log::debug!("[SESSION] command failed: {error}");
        self.alerts.error(error.user_message());
    }

    /// Whether a live session exists right now (exposed for the binary)
    pub fn is_authenticated(&self) -> bool {
        let store = self.store.lock().unwrap();
        SessionMonitor::is_authenticated(&store)
    }

    pub fn monitor_state(&self) -> MonitorState {
        self.monitor.lock().unwrap().state()
    }
}

fn page_to_rows<T: Serialize>(page: &Page<T>) -> (Vec<Row>, u64) {
    let rows = page
        .content
        .iter()
        .filter_map(|item| match serde_json::to_value(item) {
            Ok(Value::Object(map)) => Some(map),
            _ => None,
        })
        .collect();
    (rows, page.total_elements)
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn compact_line(value: &Value) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sales_link::Customer;

    fn sample_page() -> Page<Customer> {
        Page {
            content: vec![Customer {
                id: 1,
                code: "CLI-001".to_string(),
                full_name: "Maria Silva".to_string(),
                mother_name: "Ana Silva".to_string(),
                cpf: "123.456.789-00".to_string(),
                rg: "12.345.678-9".to_string(),
                address: sales_link::Address {
                    zip_code: "01001-000".to_string(),
                    street: "Praça da Sé".to_string(),
                    number: "1".to_string(),
                    complement: None,
                    neighborhood: "Sé".to_string(),
                    city: "São Paulo".to_string(),
                    state: "SP".to_string(),
                },
                birth_date: "1990-05-10".to_string(),
                cell_phone: "(11) 99999-0000".to_string(),
                email: "maria@example.com".to_string(),
                created_at: "2025-01-02T10:00:00Z".to_string(),
            }],
            total_elements: 47,
            total_pages: 5,
            size: 10,
            number: 0,
        }
    }

    #[test]
    fn test_page_to_rows_keeps_wire_keys() {
        let (rows, total) = page_to_rows(&sample_page());
        assert_eq!(total, 47);
        assert_eq!(rows.len(), 1);
        // camelCase keys match the column descriptors
        assert_eq!(rows[0]["fullName"], "Maria Silva");
        assert_eq!(rows[0]["cellPhone"], "(11) 99999-0000");
    }

    #[test]
    fn test_resource_columns_cover_formats() {
        let cols = Resource::Sales.columns();
        assert!(cols.iter().any(|c| c.format == CellFormat::Currency));
        assert!(cols.iter().any(|c| c.format == CellFormat::PaymentMethod));
        let cols = Resource::Products.columns();
        assert!(cols.iter().any(|c| c.format == CellFormat::ProductType));
    }

    // Nothing listens on discard; requests fail fast.
    fn test_session() -> (ConsoleSession, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::with_path(dir.path().join("session.toml")).unwrap();
        let client = SalesClient::builder()
            .base_url("http://127.0.0.1:9")
            .timeout(Duration::from_millis(200))
            .build()
            .unwrap();
        let session = ConsoleSession::new(
            client,
            store,
            ConsoleConfig::default(),
            OutputFormat::Table,
            false,
            false,
        );
        (session, dir)
    }

    fn open_customers(session: &mut ConsoleSession) {
        let mut table = ServerPagedTable::new(Resource::Customers.columns(), 10)
            .with_actions(Resource::Customers.actions());
        let (rows, _) = page_to_rows(&sample_page());
        table.set_page(rows, 47);
        session.open_table = Some(OpenTable {
            resource: Resource::Customers,
            filter: String::new(),
            table,
        });
    }

    #[tokio::test]
    async fn test_navigation_usage_errors_keep_open_table() {
        let (mut session, _dir) = test_session();
        open_customers(&mut session);

        assert!(session.cmd_navigate("sort", &[]).await.is_err());
        assert!(session.open_table.is_some());

        assert!(session.cmd_navigate("page", &[]).await.is_err());
        assert!(session.open_table.is_some());
    }

    #[tokio::test]
    async fn test_failed_refetch_reverts_page_index() {
        let (mut session, _dir) = test_session();
        open_customers(&mut session);

        assert!(session.cmd_navigate("next", &[]).await.is_err());

        let open = session.open_table.as_ref().unwrap();
        assert_eq!(open.table.page_index(), 0);
        assert_eq!(open.table.rows().len(), 1);
    }

    #[test]
    fn test_open_table_footer_lists_actions() {
        let table = ServerPagedTable::new(Resource::Sales.columns(), 10)
            .with_actions(Resource::Sales.actions());
        let out = table.render(Some(100), false);
        assert!(out.contains("Ações: Ver (get), Remover (delete)"));
    }
}
