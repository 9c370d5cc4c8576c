use alloy_primitives::Address;
use leptos::prelude::window;
use web_sys::js_sys::Date;

pub fn alert(msg: impl AsRef<str>) {
    let _ = window().alert_with_message(msg.as_ref());
}

/// Opens `url` in a new tab.
pub fn open_in_new_tab(url: impl AsRef<str>) {
    if let Err(error) = window().open_with_url_and_target(url.as_ref(), "_blank") {
        tracing::warn!("failed to open {}: {error:?}", url.as_ref());
    }
}

/// Unix time in milliseconds.
pub fn now_ms() -> u64 {
    Date::now() as u64
}

/// `0x1234…abcd`
pub fn shorten_address(address: Address) -> String {
    let address = address.to_string();
    format!("{}…{}", &address[..6], &address[address.len() - 4..])
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::address;

    #[test]
    fn shortens_addresses() {
        let address = address!("d8da6bf26964af9d7eed9e03e53415d37aa96045");
        assert_eq!(shorten_address(address), "0xd8dA…6045");
    }
}
