//! Leading-byte signature table.

pub(super) struct Signature {
    pub extension: &'static str,
    pub mimetype: &'static str,
}

const fn sig(extension: &'static str, mimetype: &'static str) -> Option<Signature> {
    Some(Signature {
        extension,
        mimetype,
    })
}

pub(super) fn lookup(head: &[u8]) -> Option<Signature> {
    match head {
        [0x1F, 0x8B, ..] => sig(".gz", "application/gzip"),
        [0x50, 0x4B, 0x03, 0x04, ..] | [0x50, 0x4B, 0x05, 0x06, ..] => {
            sig(".zip", "application/zip")
        }
        [0x28, 0xB5, 0x2F, 0xFD, ..] => sig(".zst", "application/zstd"),
        [0xFD, 0x37, 0x7A, 0x58, 0x5A, 0x00, ..] => sig(".xz", "application/x-xz"),
        [b'B', b'Z', b'h', ..] => sig(".bz2", "application/x-bzip2"),
        [b'7', b'z', 0xBC, 0xAF, 0x27, 0x1C, ..] => sig(".7z", "application/x-7z-compressed"),
        [b'%', b'P', b'D', b'F', b'-', ..] => sig(".pdf", "application/pdf"),
        [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, ..] => sig(".png", "image/png"),
        [0xFF, 0xD8, 0xFF, ..] => sig(".jpg", "image/jpeg"),
        [b'G', b'I', b'F', b'8', b'7' | b'9', b'a', ..] => sig(".gif", "image/gif"),
        [b'R', b'I', b'F', b'F', _, _, _, _, b'W', b'E', b'B', b'P', ..] => {
            sig(".webp", "image/webp")
        }
        [0x00, b'a', b's', b'm', ..] => sig(".wasm", "application/wasm"),
        [0x7F, b'E', b'L', b'F', ..] => sig("", "application/x-elf"),
        [b'O', b'g', b'g', b'S', ..] => sig(".ogg", "application/ogg"),
        [b'I', b'D', b'3', ..] => sig(".mp3", "audio/mpeg"),
        _ if head.starts_with(b"SQLite format 3\0") => sig(".sqlite", "application/vnd.sqlite3"),
        _ if is_tar(head) => sig(".tar", "application/x-tar"),
        _ => None,
    }
}

fn is_tar(head: &[u8]) -> bool {
    head.len() >= 263 && head[257..262] == *b"ustar"
}
