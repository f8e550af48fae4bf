//! # Help Text
//!
//! Help message listing the bot commands.
//! Displayed to the user via `/start` or `/help`.

pub const MAIN: &str = concat!(
    "*👋 Payment Bot*\n",
    "Commands work with or without the leading /\n",
    "\n",
    "/start - Show this help\n",
    "/profile - Show your profile (alias /me)\n",
    "/getpayments - List payment methods (alias /payments)\n",
    "/setpayment <provider> <details> - Set a payment method (admin)\n",
    "\n",
    "Providers: jazzcash, easypaisa\n"
);
