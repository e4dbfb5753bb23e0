//! Target architecture descriptors.
//!
//! A [`TargetInfo`] is a read-only value record describing the machine
//! the compiler emits for: word and pointer size, endianness, stack
//! alignment, register sets, and the calling convention. The lexer
//! consumes it to bound numeric literals to the target word; the
//! downstream stages receive it as part of the front-end hand-off.
//!
//! Both supported targets are little-endian x86 family ABIs; anything
//! else falls back to x86-64 defaults (the driver reports the fallback).

use std::fmt;

/// Target architecture tag.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[allow(non_camel_case_types, reason = "X86_64 is the canonical spelling")]
pub enum Arch {
    X86,
    X86_64,
    Unknown,
}

impl Arch {
    /// Parse the `--target=` spelling.
    pub fn parse(text: &str) -> Option<Arch> {
        match text {
            "x86" => Some(Arch::X86),
            "x86-64" | "x86_64" => Some(Arch::X86_64),
            _ => None,
        }
    }
}

impl fmt::Display for Arch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Arch::X86 => "x86",
            Arch::X86_64 => "x86-64",
            Arch::Unknown => "unknown",
        };
        f.write_str(name)
    }
}

/// Byte order. Both supported targets are little-endian.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Endianness {
    Little,
    Big,
}

/// Calling convention family.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum CallConvKind {
    /// 32-bit cdecl: arguments on the stack, caller cleans.
    Cdecl,
    /// System V AMD64: first six integer arguments in registers.
    SystemV,
}

/// Register names for one target.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct RegisterInfo {
    /// General-purpose set, allocation order.
    pub general: &'static [&'static str],
    /// Argument-passing subset (empty on stack-argument targets).
    pub args: &'static [&'static str],
    /// Return-value register.
    pub ret: &'static str,
}

/// Calling convention record.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct CallConv {
    pub kind: CallConvKind,
    pub arg_registers: &'static [&'static str],
    pub return_register: &'static str,
    pub caller_cleans_stack: bool,
    /// Required stack alignment at call sites, in bytes.
    pub alignment: u32,
}

/// Read-only target descriptor.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct TargetInfo {
    pub arch: Arch,
    /// Natural integer width in bytes (4 or 8); every Чпп value is one word.
    pub word_size: u32,
    /// Equal to `word_size` on both supported targets.
    pub pointer_size: u32,
    pub endianness: Endianness,
    pub stack_alignment: u32,
    pub asm_syntax: &'static str,
    pub registers: RegisterInfo,
    pub call_conv: CallConv,
}

const X86_GENERAL: &[&str] = &["eax", "ebx", "ecx", "edx", "esi", "edi"];
const X86_64_GENERAL: &[&str] = &[
    "rax", "rbx", "rcx", "rdx", "rsi", "rdi", "r8", "r9", "r10", "r11", "r12", "r13", "r14", "r15",
];
const X86_64_ARGS: &[&str] = &["rdi", "rsi", "rdx", "rcx", "r8", "r9"];

const X86: TargetInfo = TargetInfo {
    arch: Arch::X86,
    word_size: 4,
    pointer_size: 4,
    endianness: Endianness::Little,
    stack_alignment: 4,
    asm_syntax: "intel",
    registers: RegisterInfo {
        general: X86_GENERAL,
        args: &[],
        ret: "eax",
    },
    call_conv: CallConv {
        kind: CallConvKind::Cdecl,
        arg_registers: &[],
        return_register: "eax",
        caller_cleans_stack: true,
        alignment: 4,
    },
};

const X86_64: TargetInfo = TargetInfo {
    arch: Arch::X86_64,
    word_size: 8,
    pointer_size: 8,
    endianness: Endianness::Little,
    stack_alignment: 16,
    asm_syntax: "intel",
    registers: RegisterInfo {
        general: X86_64_GENERAL,
        args: X86_64_ARGS,
        ret: "rax",
    },
    call_conv: CallConv {
        kind: CallConvKind::SystemV,
        arg_registers: X86_64_ARGS,
        return_register: "rax",
        caller_cleans_stack: true,
        alignment: 16,
    },
};

impl TargetInfo {
    /// Detect the host architecture from compile-time configuration.
    pub fn detect() -> Arch {
        if cfg!(target_arch = "x86_64") {
            Arch::X86_64
        } else if cfg!(target_arch = "x86") {
            Arch::X86
        } else {
            Arch::Unknown
        }
    }

    /// Descriptor for the host. On an unrecognized host this carries
    /// x86-64 defaults with `arch == Arch::Unknown`; the driver reports
    /// the fallback as a warning.
    pub fn host() -> TargetInfo {
        Self::for_arch(Self::detect())
    }

    /// Descriptor for a specific architecture. `Unknown` keeps its tag
    /// but takes x86-64 defaults.
    pub fn for_arch(arch: Arch) -> TargetInfo {
        match arch {
            Arch::X86 => X86,
            Arch::X86_64 => X86_64,
            Arch::Unknown => TargetInfo {
                arch: Arch::Unknown,
                ..X86_64
            },
        }
    }

    /// Word width in bits.
    pub const fn word_bits(&self) -> u32 {
        self.word_size * 8
    }

    /// Largest numeric-literal value representable in one signed word.
    /// The lexer uses this to bound literals.
    pub const fn max_literal(&self) -> i64 {
        if self.word_size == 4 {
            i32::MAX as i64
        } else {
            i64::MAX
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn x86_descriptor() {
        let info = TargetInfo::for_arch(Arch::X86);
        assert_eq!(info.word_size, 4);
        assert_eq!(info.pointer_size, 4);
        assert_eq!(info.stack_alignment, 4);
        assert_eq!(info.endianness, Endianness::Little);
        assert_eq!(info.call_conv.kind, CallConvKind::Cdecl);
        assert!(info.call_conv.arg_registers.is_empty());
        assert_eq!(info.registers.ret, "eax");
        assert_eq!(info.asm_syntax, "intel");
        assert_eq!(info.word_bits(), 32);
        assert_eq!(info.max_literal(), i64::from(i32::MAX));
    }

    #[test]
    fn x86_64_descriptor() {
        let info = TargetInfo::for_arch(Arch::X86_64);
        assert_eq!(info.word_size, 8);
        assert_eq!(info.stack_alignment, 16);
        assert_eq!(info.call_conv.kind, CallConvKind::SystemV);
        assert_eq!(
            info.call_conv.arg_registers,
            &["rdi", "rsi", "rdx", "rcx", "r8", "r9"]
        );
        assert_eq!(info.registers.ret, "rax");
        assert_eq!(info.max_literal(), i64::MAX);
    }

    #[test]
    fn pointer_size_equals_word_size() {
        for arch in [Arch::X86, Arch::X86_64, Arch::Unknown] {
            let info = TargetInfo::for_arch(arch);
            assert_eq!(info.word_size, info.pointer_size);
        }
    }

    #[test]
    fn unknown_falls_back_to_x86_64_defaults() {
        let info = TargetInfo::for_arch(Arch::Unknown);
        assert_eq!(info.arch, Arch::Unknown);
        assert_eq!(info.word_size, 8);
        assert_eq!(info.call_conv.kind, CallConvKind::SystemV);
    }

    #[test]
    fn arch_parsing() {
        assert_eq!(Arch::parse("x86"), Some(Arch::X86));
        assert_eq!(Arch::parse("x86-64"), Some(Arch::X86_64));
        assert_eq!(Arch::parse("x86_64"), Some(Arch::X86_64));
        assert_eq!(Arch::parse("arm64"), None);
        assert_eq!(Arch::X86_64.to_string(), "x86-64");
    }

    #[test]
    fn host_matches_detection() {
        let info = TargetInfo::host();
        assert_eq!(info.arch, TargetInfo::detect());
    }
}
