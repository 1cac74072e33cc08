use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;

use clap::{Parser, Subcommand};
use rewear_client::app::item_detail::OWNER_BANNER;
use rewear_client::app::notifications::drain;
use rewear_client::app::{
    AddItemForm, AdminAccess, AppContext, BrowseConfig, BrowseVariant, BrowseView, DashboardPhase,
    DetailActions, DetailPhase, FeaturedShowcase, ItemDetailView, ListPhase, Toast,
};
use rewear_client::config::ClientConfig;
use rewear_client::debug::{self, LogConfig};
use rewear_client::services::api::UploadFile;
use rewear_client::{AppError, Result};
use shared::{Item, ItemId, ListingType, SwapRequestId};

#[derive(Parser)]
#[command(name = "rewear")]
#[command(version, about = "ReWear clothing exchange client", long_about = None)]
struct Cli {
    /// Sign in with this email before running the command
    #[arg(long, env = "REWEAR_EMAIL", global = true)]
    email: Option<String>,

    #[arg(long, env = "REWEAR_PASSWORD", global = true, hide_env_values = true)]
    password: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Latest approved items, three per slide
    Featured,
    /// List approved items
    Browse {
        #[arg(long)]
        search: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        condition: Option<String>,
        #[arg(long)]
        size: Option<String>,
        /// Show only the swap or donation tab
        #[arg(long)]
        tab: Option<ListingType>,
    },
    /// Show one item and what you can do with it
    Item { id: ItemId },
    /// Redeem an item with points
    Redeem { id: ItemId },
    /// Send a swap request for an item
    Swap {
        id: ItemId,
        #[arg(long)]
        message: Option<String>,
    },
    /// Message the owner of an item
    Message { id: ItemId, text: String },
    /// List a new item
    AddItem {
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: String,
        #[arg(long)]
        category: String,
        #[arg(long = "type")]
        item_type: String,
        #[arg(long)]
        size: String,
        #[arg(long)]
        condition: String,
        #[arg(long, default_value = "swap")]
        listing_type: ListingType,
        #[arg(long = "tag")]
        tags: Vec<String>,
        /// Up to five photos
        #[arg(long = "image", required = true)]
        images: Vec<PathBuf>,
        /// Purchase bill, required for swap listings
        #[arg(long)]
        bill: Option<PathBuf>,
    },
    /// Points, counters and recent listings
    Dashboard,
    /// Incoming and outgoing swap requests
    Inbox,
    AcceptSwap { id: SwapRequestId },
    RejectSwap { id: SwapRequestId },
    /// Admin: pending queue and counters
    Pending,
    /// Admin: approve a pending item
    Approve { id: ItemId },
    /// Admin: reject a pending item
    Reject {
        id: ItemId,
        #[arg(long)]
        reason: Option<String>,
    },
    Logout,
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let _guard = debug::init(&LogConfig::from_env());

    let setup = ClientConfig::load().and_then(AppContext::connect);
    let (ctx, toasts) = match setup {
        Ok(setup) => setup,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let result = run(&ctx, cli).await;

    for toast in drain(&toasts) {
        print_toast(&toast);
    }

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::warn!(error = %e, "Command failed");
            eprintln!("Error: {}", e.user_message("Command failed"));
            ExitCode::FAILURE
        }
    }
}

async fn run(ctx: &AppContext, cli: Cli) -> Result<()> {
    match (cli.email.as_deref(), cli.password.as_deref()) {
        (Some(email), Some(password)) => {
            ctx.session.login(email, password).await?;
        }
        _ => {
            ctx.session.initialize().await;
        }
    }

    match cli.command {
        Command::Featured => {
            let showcase = ctx.featured();
            if showcase.load().await == 0 {
                println!("No featured items yet.");
                return Ok(());
            }
            for _ in 0..showcase.slides().len() {
                println!("Slide {}", showcase.slides().label());
                for item in showcase.visible_items() {
                    print_item(&item);
                    println!("        {}", FeaturedShowcase::route_for(&item).path());
                }
                showcase.next_slide();
            }
            Ok(())
        }
        Command::Browse {
            search,
            category,
            condition,
            size,
            tab,
        } => browse(ctx, search, category, condition, size, tab).await,
        Command::Item { id } => {
            let view = load_item(ctx, id).await?;
            if let Some(item) = view.item() {
                print_item(&item);
            }
            let carousel = view.carousel();
            for (index, url) in view.image_urls().iter().enumerate() {
                println!("  image {} / {}: {url}", index + 1, carousel.len());
            }
            match view.actions() {
                Some(DetailActions::SignInRequired) => println!("Sign in to swap or redeem."),
                Some(DetailActions::Owner) => println!("{OWNER_BANNER}"),
                Some(DetailActions::Unavailable(status)) => println!("Not available ({status})."),
                Some(DetailActions::Available { redeem, .. }) => {
                    println!("Actions: request swap | {}", redeem.label);
                }
                None => {}
            }
            Ok(())
        }
        Command::Redeem { id } => {
            let view = load_item(ctx, id).await?;
            let balance = view.redeem().await?;
            println!("New balance: {balance} points");
            Ok(())
        }
        Command::Swap { id, message } => {
            let view = load_item(ctx, id).await?;
            view.request_swap(message.as_deref()).await?;
            Ok(())
        }
        Command::Message { id, text } => {
            let view = load_item(ctx, id).await?;
            view.send_message(&text).await
        }
        Command::AddItem {
            title,
            description,
            category,
            item_type,
            size,
            condition,
            listing_type,
            tags,
            images,
            bill,
        } => {
            if !ctx.session.is_authenticated() {
                return Err(sign_in_required());
            }
            let mut form = AddItemForm::new();
            form.title = title;
            form.description = description;
            form.category = category;
            form.item_type = item_type;
            form.size = size;
            form.condition = condition;
            form.listing_type = listing_type;
            for tag in &tags {
                form.add_tag(tag);
            }
            let mut batch = Vec::with_capacity(images.len());
            for path in &images {
                batch.push(read_upload(path).await?);
            }
            form.add_images(batch)?;
            if let Some(path) = &bill {
                form.set_bill(read_upload(path).await?);
            }
            if let Some(points) = form.estimated_points() {
                println!("Estimated value: {points} points");
            }
            let route = form
                .submit(ctx.api.as_ref(), &ctx.session, &ctx.notifier)
                .await?;
            println!("Next: {}", route.path());
            Ok(())
        }
        Command::Dashboard => {
            let dashboard = ctx.dashboard();
            match dashboard.load().await {
                DashboardPhase::Ready => {
                    let stats = dashboard.stats();
                    println!("Points: {}", dashboard.points());
                    println!(
                        "Items listed: {}  approved: {}  swaps: {}",
                        stats.total_items, stats.approved_items, stats.total_swaps
                    );
                    for item in dashboard.recent_items() {
                        print_item(&item);
                    }
                    Ok(())
                }
                DashboardPhase::Redirect(_) => Err(sign_in_required()),
                DashboardPhase::Failed(message) => Err(AppError::State(message)),
                DashboardPhase::Loading => {
                    Err(AppError::State("Session is still loading.".to_string()))
                }
            }
        }
        Command::Inbox => {
            let inbox = ctx.swap_inbox();
            inbox.load().await?;
            println!("Incoming:");
            for row in inbox.incoming() {
                let request = row.request;
                println!(
                    "  #{} item {} from user {} ({:?}) {}",
                    request.id,
                    request.item_id,
                    request.requester_id,
                    request.status,
                    request.message.unwrap_or_default()
                );
            }
            println!("Outgoing:");
            for request in inbox.outgoing() {
                println!("  #{} item {} ({:?})", request.id, request.item_id, request.status);
            }
            Ok(())
        }
        Command::AcceptSwap { id } => {
            let inbox = ctx.swap_inbox();
            inbox.load().await?;
            inbox.accept(id).await
        }
        Command::RejectSwap { id } => {
            let inbox = ctx.swap_inbox();
            inbox.load().await?;
            inbox.reject(id).await
        }
        Command::Pending => {
            let console = ctx.admin();
            guard_admin(console.access())?;
            console.load().await?;
            let stats = console.stats();
            println!(
                "Pending: {}  Approved: {}  Users: {}  Swaps: {}  Reports: {}",
                stats.pending_items,
                stats.approved_items,
                stats.total_users,
                stats.total_swaps,
                stats.reports
            );
            for item in console.pending_items() {
                print_item(&item);
            }
            Ok(())
        }
        Command::Approve { id } => {
            let console = ctx.admin();
            guard_admin(console.access())?;
            console.load().await?;
            console.approve(id).await
        }
        Command::Reject { id, reason } => {
            let console = ctx.admin();
            guard_admin(console.access())?;
            console.load().await?;
            console.reject(id, reason.as_deref()).await
        }
        Command::Logout => {
            ctx.session.logout().await;
            Ok(())
        }
    }
}

async fn browse(
    ctx: &AppContext,
    search: Option<String>,
    category: Option<String>,
    condition: Option<String>,
    size: Option<String>,
    tab: Option<ListingType>,
) -> Result<()> {
    let variant = if tab.is_some() {
        BrowseVariant::Partitioned
    } else {
        BrowseVariant::Single
    };
    // One-shot command: nothing to debounce.
    let config = BrowseConfig {
        debounce: Duration::ZERO,
        variant,
    };
    let view = BrowseView::new(ctx.api.clone(), ctx.notifier.clone(), config);
    if let Some(tab) = tab {
        view.set_tab(tab);
    }

    view.update_filters(|filters| {
        if let Some(search) = search {
            filters.search = search;
        }
        if let Some(category) = category {
            filters.category = category;
        }
        if let Some(condition) = condition {
            filters.condition = condition;
        }
        if let Some(size) = size {
            filters.size = size;
        }
    })
    .await;

    match view.phase() {
        ListPhase::Loaded => {
            for item in view.visible_items() {
                print_item(&item);
            }
            Ok(())
        }
        ListPhase::Empty => {
            println!("No items found. Try adjusting your filters.");
            Ok(())
        }
        ListPhase::Failed(message) => Err(AppError::State(message)),
        ListPhase::Loading => Ok(()),
    }
}

async fn load_item(ctx: &AppContext, id: ItemId) -> Result<ItemDetailView> {
    let view = ctx.item_detail(id);
    match view.load().await {
        DetailPhase::Loaded => Ok(view),
        DetailPhase::NotFound => Err(AppError::State(format!("Item {id} not found."))),
        DetailPhase::Failed(message) => Err(AppError::State(message)),
        DetailPhase::Loading => Err(AppError::State("Item is still loading.".to_string())),
    }
}

async fn read_upload(path: &Path) -> Result<UploadFile> {
    UploadFile::from_path(path)
        .await
        .map_err(|e| AppError::Validation(format!("Cannot read {}: {}", path.display(), e)))
}

fn guard_admin(access: AdminAccess) -> Result<()> {
    match access {
        AdminAccess::Granted => Ok(()),
        AdminAccess::Denied { .. } => Err(AppError::Access("Admin access required.".to_string())),
        AdminAccess::Pending => Err(sign_in_required()),
    }
}

fn sign_in_required() -> AppError {
    AppError::Access(
        "Sign in with --email and --password (or REWEAR_EMAIL / REWEAR_PASSWORD).".to_string(),
    )
}

fn print_item(item: &Item) {
    println!(
        "#{:<5} {:<32} {:<12} {:<4} {:<10} {:>4} pts  [{}]",
        item.id,
        item.title,
        item.category.as_deref().unwrap_or("-"),
        item.size,
        item.condition,
        item.points,
        item.status
    );
}

fn print_toast(toast: &Toast) {
    if toast.is_destructive() {
        eprintln!("! {}: {}", toast.title, toast.description);
    } else {
        eprintln!("{}: {}", toast.title, toast.description);
    }
}
