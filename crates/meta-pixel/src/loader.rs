//! Script-tag contract for the vendor pixel — the fixed CDN location and
//! bootstrap constants. Loading itself is delegated to the host runtime;
//! the vendor's shim queues calls issued before the script attaches.

use url::Url;

/// Fixed CDN location of the vendor tracking script. Exactly one script
/// resource is requested, with no parameters beyond this URL.
pub const SCRIPT_URL: &str = "https://connect.facebook.net/en_US/fbevents.js";

/// Pixel bootstrap protocol version.
pub const PIXEL_VERSION: &str = "2.0";

/// The vendor's fixed nine-name standard-event taxonomy.
pub const STANDARD_EVENT_NAMES: [&str; 9] = [
    "ViewContent",
    "Search",
    "AddToCart",
    "AddToWishlist",
    "InitiateCheckout",
    "AddPaymentInfo",
    "Purchase",
    "Lead",
    "CompleteRegistration",
];

/// The script location as a typed URL.
pub fn script_url() -> Url {
    Url::parse(SCRIPT_URL).expect("static script url is valid")
}
