#![no_main]
use libfuzzer_sys::fuzz_target;
use robowire::http::{DatagramDecoratedRequest, DecoratedRequest, DecoratedResponse};

fn framing(data: &[u8]) {
    if let Ok(request) = DecoratedRequest::parse(data) {
        let again = DecoratedRequest::parse(request.to_wire().as_bytes()).unwrap();
        assert_eq!(again.denominator(), request.denominator());
        assert_eq!(again.headers(), request.headers());
        assert_eq!(again.body(), request.body());
    }

    if let Ok(response) = DecoratedResponse::parse(data) {
        let again = DecoratedResponse::parse(response.to_wire().as_bytes()).unwrap();
        assert_eq!(again.denominator(), response.denominator());
        assert_eq!(again.body(), response.body());
    }

    if let Ok(datagram) = DatagramDecoratedRequest::from_bytes(data) {
        let again = DatagramDecoratedRequest::from_bytes(&datagram.to_bytes()).unwrap();
        assert_eq!(again, datagram);
    }
}

fuzz_target!(|data: &[u8]| framing(data));
