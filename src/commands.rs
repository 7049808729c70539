//! Tool command surface
//!
//! Line-delimited JSON over any async reader/writer pair. One request per
//! line, `{"id": .., "tool": "..", "arguments": {..}}`; one reply per line,
//! `{"id": .., "content": ".."}` where `content` is the operation's report
//! text or its JSON payload.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, warn};

use crate::application::{ScraperTools, ToolResponse};
use crate::domain::constants::search;
use crate::infrastructure::PageFetcher;

pub const GET_PRODUCT: &str = "get_product";
pub const SEARCH_PRODUCTS: &str = "search_products";
pub const LIST_TOOLS: &str = "list_tools";

/// One request line
#[derive(Debug, Clone, Deserialize)]
pub struct ToolInvocation {
    #[serde(default)]
    pub id: Value,
    pub tool: String,
    #[serde(default)]
    pub arguments: Value,
}

/// One reply line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolReply {
    pub id: Value,
    pub content: String,
}

/// Name, description and argument schema of a tool
#[derive(Debug, Clone, Serialize)]
pub struct ToolDescriptor {
    pub name: &'static str,
    pub description: &'static str,
    pub input_schema: Value,
}

#[derive(Debug, Deserialize)]
struct GetProductArgs {
    product_url: String,
}

#[derive(Debug, Deserialize)]
struct SearchProductsArgs {
    query: String,
    #[serde(default = "default_max_results")]
    max_results: i64,
}

#[allow(clippy::cast_possible_wrap)]
const fn default_max_results() -> i64 {
    search::DEFAULT_MAX_RESULTS as i64
}

/// Descriptors for every tool this server answers
pub fn list_tools() -> Vec<ToolDescriptor> {
    vec![
        ToolDescriptor {
            name: GET_PRODUCT,
            description: "Get product details from a Flipkart product URL",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "product_url": {
                        "type": "string",
                        "description": "Full Flipkart product URL (e.g., https://www.flipkart.com/product-name/p/itm...)"
                    }
                },
                "required": ["product_url"]
            }),
        },
        ToolDescriptor {
            name: SEARCH_PRODUCTS,
            description: "Search for products on Flipkart and return results",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "query": {
                        "type": "string",
                        "description": "Search term (e.g., \"laptop\", \"smartphone\", \"shoes\")"
                    },
                    "max_results": {
                        "type": "integer",
                        "description": "Maximum number of results to return (default: 5, max: 20)",
                        "default": search::DEFAULT_MAX_RESULTS
                    }
                },
                "required": ["query"]
            }),
        },
    ]
}

/// Run one invocation to completion
pub async fn dispatch<F: PageFetcher>(tools: &ScraperTools<F>, invocation: ToolInvocation) -> ToolReply {
    debug!(tool = %invocation.tool, "Dispatching tool call");

    let response = match invocation.tool.as_str() {
        GET_PRODUCT => match serde_json::from_value::<GetProductArgs>(invocation.arguments) {
            Ok(args) => tools.get_product(&args.product_url).await,
            Err(e) => invalid_arguments(GET_PRODUCT, &e),
        },
        SEARCH_PRODUCTS => match serde_json::from_value::<SearchProductsArgs>(invocation.arguments) {
            Ok(args) => tools.search_products(&args.query, args.max_results).await,
            Err(e) => invalid_arguments(SEARCH_PRODUCTS, &e),
        },
        LIST_TOOLS => {
            return ToolReply {
                id: invocation.id,
                content: serde_json::to_string_pretty(&list_tools())
                    .unwrap_or_else(|e| ToolResponse::error(e.to_string()).render()),
            };
        }
        other => {
            warn!("Unknown tool requested: {}", other);
            ToolResponse::error(format!("Unknown tool: {other}"))
        }
    };

    ToolReply {
        id: invocation.id,
        content: response.render(),
    }
}

fn invalid_arguments(tool: &str, error: &serde_json::Error) -> ToolResponse {
    ToolResponse::error(format!("Invalid arguments for {tool}: {error}"))
}

/// Answer request lines from `reader` on `writer` until end of input.
pub async fn serve<F, R, W>(tools: &ScraperTools<F>, reader: R, mut writer: W) -> std::io::Result<()>
where
    F: PageFetcher,
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = reader.lines();

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let reply = match serde_json::from_str::<ToolInvocation>(line) {
            Ok(invocation) => dispatch(tools, invocation).await,
            Err(e) => {
                warn!("Malformed request line: {}", e);
                ToolReply {
                    id: Value::Null,
                    content: ToolResponse::error(format!("Malformed request: {e}")).render(),
                }
            }
        };

        let mut encoded = serde_json::to_string(&reply).map_err(std::io::Error::other)?;
        encoded.push('\n');
        writer.write_all(encoded.as_bytes()).await?;
        writer.flush().await?;
    }

    debug!("Input closed, stopping");
    Ok(())
}
