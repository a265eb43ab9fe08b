//! The semantic/IR visitor: a single pre-order depth-first walk that
//! type-checks and emits SSA-form IR in the same pass.
//!
//! Every expression method leaves `node.ty`/`node.ir_value` populated after
//! visiting; statement methods may additionally open/close a symbol-table
//! scope and/or emit basic-block structure around their children. Children
//! are always visited left before right — `And`/`Or`'s short-circuit IR
//! depends on this order, and it is the only ordering guarantee the grammar
//! needs.

use tinyc_par::{BinOpKind, Expr, ExprKind, FuncDecl, Program, RelOpKind, Stmt, StmtKind, Type};
use tinyc_sem::{Binding, BindingKind, Tables};
use tinyc_util::{Handler, Symbol};

use crate::buffer::CodeBuffer;
use crate::types::llvm_type;

pub struct Visitor<'h> {
    buffer: CodeBuffer,
    tables: Tables,
    handler: &'h Handler,
    /// The return type of the `FuncDecl` currently being visited. `None`
    /// outside of any function body; `Return` reads this to check/widen.
    current_return_type: Option<Type>,
}

impl<'h> Visitor<'h> {
    pub fn new(handler: &'h Handler) -> Self {
        Self {
            buffer: CodeBuffer::new(),
            tables: Tables::new(),
            handler,
            current_return_type: None,
        }
    }

    pub fn into_buffer(self) -> CodeBuffer {
        self.buffer
    }

    /// Phase 1: declare every function, enforcing `main`'s signature.
    /// Phase 2: visit each declaration's body.
    pub fn visit_program(&mut self, program: &mut Program) {
        for decl in program.iter() {
            let formals: Vec<Type> = decl.formals.iter().map(|f| f.ty).collect();
            let binding = Binding::function(decl.name, decl.return_type, formals, decl.line);
            self.tables.insert_function(binding, self.handler);
        }
        match self.tables.resolve_function(Symbol::intern("main")) {
            Some(Binding {
                kind: BindingKind::Function { return_type, formals },
                ..
            }) if *return_type == Type::Void && formals.is_empty() => {}
            _ => self.handler.main_missing(),
        }
        for decl in program.iter_mut() {
            self.visit_func_decl(decl);
        }
    }

    fn visit_func_decl(&mut self, decl: &mut FuncDecl) {
        self.tables.enter_function();
        self.current_return_type = Some(decl.return_type);

        let mut arg_regs = Vec::with_capacity(decl.formals.len());
        for formal in &decl.formals {
            let arg_reg = self.buffer.fresh_arg();
            let offset = self.tables.next_formal_offset();
            let binding = Binding::variable(formal.id, formal.ty, offset, formal.line, arg_reg.clone());
            self.tables.insert_formal(binding, self.handler);
            arg_regs.push(arg_reg);
        }
        let sig = decl
            .formals
            .iter()
            .zip(&arg_regs)
            .map(|(formal, reg)| format!("{} {reg}", llvm_type(formal.ty)))
            .collect::<Vec<_>>()
            .join(", ");
        self.buffer
            .emit(format!("define {} @{}({sig}) {{", llvm_type(decl.return_type), decl.name));

        // Prologue: give every formal an addressable slot, then repoint the
        // symbol table at that slot so every later `ID`/`Assign` load/store
        // is uniform regardless of whether the name is a formal or a local.
        for (formal, arg_reg) in decl.formals.iter().zip(&arg_regs) {
            let ty_str = llvm_type(formal.ty);
            let slot = self.buffer.fresh_var();
            self.buffer.emit(format!("{slot} = alloca {ty_str}"));
            self.buffer.emit(format!("store {ty_str} {arg_reg}, {ty_str}* {slot}"));
            self.tables.set_emitted_name(formal.id, slot);
        }

        self.visit_stmts(&mut decl.body);
        self.tables.exit_scope();

        self.buffer.emit(trailing_return(decl.return_type));
        self.buffer.emit("}");
        self.current_return_type = None;
    }

    fn visit_stmts(&mut self, stmts: &mut [Stmt]) {
        for stmt in stmts {
            self.visit_stmt(stmt);
        }
    }

    fn visit_stmt(&mut self, stmt: &mut Stmt) {
        let line = stmt.line;
        match &mut stmt.kind {
            StmtKind::VarDecl { ty, id, init } => {
                // STRING has no storable representation and VOID is
                // return-only; neither gets its own catalogue entry, so
                // both route through the generic `Mismatch`.
                if *ty == Type::String || *ty == Type::Void {
                    self.handler.mismatch(line);
                }
                let offset = self.tables.current_var_offset();
                let ty_str = llvm_type(*ty);
                let slot = self.buffer.fresh_var();
                self.buffer.emit(format!("{slot} = alloca {ty_str}"));
                match init {
                    Some(init_expr) => {
                        self.visit_expr(init_expr);
                        self.reject_function_name(init_expr, line);
                        let val = self.widen_only(*ty, init_expr, line);
                        self.buffer.emit(format!("store {ty_str} {val}, {ty_str}* {slot}"));
                    }
                    None => {
                        self.buffer.emit(format!("store {ty_str} 0, {ty_str}* {slot}"));
                    }
                }
                let binding = Binding::variable(*id, *ty, offset, line, slot);
                self.tables.insert_variable(binding, self.handler);
            }
            StmtKind::Assign { id, expr } => {
                self.visit_expr(expr);
                self.reject_function_name(expr, line);
                let (ty, slot) = match self.tables.get_symbol(*id) {
                    Some(Binding {
                        kind: BindingKind::Variable { ty, emitted_name, .. },
                        ..
                    }) => (*ty, emitted_name.clone()),
                    Some(_) => self.handler.def_as_func(*id, line),
                    None => self.handler.undef(*id, line),
                };
                let val = self.widen_only(ty, expr, line);
                let ty_str = llvm_type(ty);
                self.buffer.emit(format!("store {ty_str} {val}, {ty_str}* {slot}"));
            }
            StmtKind::If {
                cond,
                then_branch,
                else_branch,
            } => {
                self.visit_expr(cond);
                if cond.ty != Some(Type::Bool) {
                    self.handler.mismatch(cond.line);
                }
                let cond_val = cond.ir_value.clone().expect("Bool expr always has an ir_value");
                let then_label = self.buffer.fresh_label();
                let end_label = self.buffer.fresh_label();
                if let Some(else_branch) = else_branch {
                    let else_label = self.buffer.fresh_label();
                    self.buffer
                        .emit(format!("br i1 {cond_val}, label {then_label}, label {else_label}"));
                    self.buffer.emit_label(&then_label);
                    self.tables.enter_scope();
                    self.visit_stmts(then_branch);
                    self.tables.exit_scope();
                    self.buffer.emit(format!("br label {end_label}"));
                    self.buffer.emit_label(&else_label);
                    self.tables.enter_scope();
                    self.visit_stmts(else_branch);
                    self.tables.exit_scope();
                    self.buffer.emit(format!("br label {end_label}"));
                } else {
                    self.buffer
                        .emit(format!("br i1 {cond_val}, label {then_label}, label {end_label}"));
                    self.buffer.emit_label(&then_label);
                    self.tables.enter_scope();
                    self.visit_stmts(then_branch);
                    self.tables.exit_scope();
                    self.buffer.emit(format!("br label {end_label}"));
                }
                self.buffer.emit_label(&end_label);
            }
            StmtKind::While { cond, body } => {
                let cond_label = self.buffer.fresh_label();
                let body_label = self.buffer.fresh_label();
                let end_label = self.buffer.fresh_label();
                self.buffer.emit(format!("br label {cond_label}"));
                self.buffer.emit_label(&cond_label);
                self.visit_expr(cond);
                if cond.ty != Some(Type::Bool) {
                    self.handler.mismatch(cond.line);
                }
                let cond_val = cond.ir_value.clone().expect("Bool expr always has an ir_value");
                self.buffer
                    .emit(format!("br i1 {cond_val}, label {body_label}, label {end_label}"));
                self.buffer.emit_label(&body_label);
                self.buffer.push_loop_labels(cond_label.clone(), end_label.clone());
                self.tables.enter_scope();
                self.visit_stmts(body);
                self.tables.exit_scope();
                self.buffer.pop_loop_labels();
                self.buffer.emit(format!("br label {cond_label}"));
                self.buffer.emit_label(&end_label);
            }
            StmtKind::Break => {
                if !self.buffer.in_loop() {
                    self.handler.unexpected_break(line);
                }
                let target = self.buffer.loop_break_target().to_string();
                self.buffer.emit(format!("br label {target}"));
            }
            StmtKind::Continue => {
                if !self.buffer.in_loop() {
                    self.handler.unexpected_continue(line);
                }
                let target = self.buffer.loop_continue_target().to_string();
                self.buffer.emit(format!("br label {target}"));
            }
            StmtKind::Return(expr_opt) => {
                let ret_ty = self
                    .current_return_type
                    .expect("Return is only ever visited inside a FuncDecl body");
                match expr_opt {
                    Some(expr) => {
                        if ret_ty == Type::Void {
                            self.handler.mismatch(line);
                        }
                        self.visit_expr(expr);
                        let val = self.widen_only(ret_ty, expr, line);
                        self.buffer.emit(format!("ret {} {val}", llvm_type(ret_ty)));
                    }
                    None => {
                        if ret_ty != Type::Void {
                            self.handler.mismatch(line);
                        }
                        self.buffer.emit("ret void");
                    }
                }
            }
            StmtKind::Block(stmts) => {
                self.tables.enter_scope();
                self.visit_stmts(stmts);
                self.tables.exit_scope();
            }
            StmtKind::ExprStmt(expr) => {
                self.visit_expr(expr);
            }
        }
    }

    fn visit_expr(&mut self, expr: &mut Expr) {
        let line = expr.line;
        match &mut expr.kind {
            ExprKind::Num(v) => {
                expr.ty = Some(Type::Int);
                expr.ir_value = Some(v.to_string());
            }
            ExprKind::NumB(v) => {
                if *v > 255 {
                    self.handler.byte_too_large(*v, line);
                }
                expr.ty = Some(Type::Byte);
                expr.ir_value = Some(v.to_string());
            }
            ExprKind::Str(sym) => {
                // No IR is emitted here: a string literal only exists as a
                // `Call` argument (to `print`), which is the sole consumer
                // of this raw, not-yet-interned text.
                expr.ty = Some(Type::String);
                expr.ir_value = Some(sym.as_str().to_string());
            }
            ExprKind::Bool(b) => {
                expr.ty = Some(Type::Bool);
                expr.ir_value = Some(if *b { "1".to_string() } else { "0".to_string() });
            }
            ExprKind::Id(sym) => match self.tables.get_symbol(*sym).cloned() {
                Some(Binding {
                    kind: BindingKind::Variable { ty, emitted_name, .. },
                    ..
                }) => {
                    let ty_str = llvm_type(ty);
                    let reg = self.buffer.fresh_var();
                    self.buffer.emit(format!("{reg} = load {ty_str}, {ty_str}* {emitted_name}"));
                    expr.ty = Some(ty);
                    expr.ir_value = Some(reg);
                }
                Some(Binding {
                    kind: BindingKind::Function { return_type, .. },
                    ..
                }) => {
                    expr.ty = Some(return_type);
                    expr.ir_value = Some(format!("@{sym}"));
                }
                None => self.handler.undef(*sym, line),
            },
            ExprKind::BinOp { op, left, right } => {
                self.visit_expr(left);
                self.visit_expr(right);
                let (common, lval, rval) = self.widen_pair(left, right, line);
                let ty_str = llvm_type(common);
                if *op == BinOpKind::Div {
                    let cmp = self.buffer.fresh_var();
                    self.buffer.emit(format!("{cmp} = icmp eq {ty_str} {rval}, 0"));
                    let err_label = self.buffer.fresh_label();
                    let ok_label = self.buffer.fresh_label();
                    self.buffer
                        .emit(format!("br i1 {cmp}, label {err_label}, label {ok_label}"));
                    self.buffer.emit_label(&err_label);
                    self.buffer.emit(
                        "call i32 (i8*, ...) @printf(i8* getelementptr inbounds ([24 x i8], [24 x i8]* @.div_zero_msg, i32 0, i32 0))",
                    );
                    self.buffer.emit("call void @exit(i32 1)");
                    self.buffer.emit(format!("br label {ok_label}"));
                    self.buffer.emit_label(&ok_label);
                    let result = self.buffer.fresh_var();
                    let divop = if common == Type::Int { "sdiv" } else { "udiv" };
                    self.buffer.emit(format!("{result} = {divop} {ty_str} {lval}, {rval}"));
                    expr.ty = Some(common);
                    expr.ir_value = Some(result);
                } else {
                    let opname = match op {
                        BinOpKind::Add => "add",
                        BinOpKind::Sub => "sub",
                        BinOpKind::Mul => "mul",
                        BinOpKind::Div => unreachable!("handled above"),
                    };
                    let result = self.buffer.fresh_var();
                    self.buffer.emit(format!("{result} = {opname} {ty_str} {lval}, {rval}"));
                    expr.ty = Some(common);
                    expr.ir_value = Some(result);
                }
            }
            ExprKind::RelOp { op, left, right } => {
                self.visit_expr(left);
                self.visit_expr(right);
                let (common, lval, rval) = self.widen_pair(left, right, line);
                let ty_str = llvm_type(common);
                let cc = match op {
                    RelOpKind::Eq => "eq",
                    RelOpKind::Ne => "ne",
                    RelOpKind::Lt => "slt",
                    RelOpKind::Le => "sle",
                    RelOpKind::Gt => "sgt",
                    RelOpKind::Ge => "sge",
                };
                let result = self.buffer.fresh_var();
                self.buffer.emit(format!("{result} = icmp {cc} {ty_str} {lval}, {rval}"));
                expr.ty = Some(Type::Bool);
                expr.ir_value = Some(result);
            }
            ExprKind::Not(inner) => {
                self.visit_expr(inner);
                if inner.ty != Some(Type::Bool) {
                    self.handler.mismatch(inner.line);
                }
                let v = inner.ir_value.clone().expect("Bool expr always has an ir_value");
                let result = self.buffer.fresh_var();
                self.buffer.emit(format!("{result} = xor i1 1, {v}"));
                expr.ty = Some(Type::Bool);
                expr.ir_value = Some(result);
            }
            ExprKind::And(left, right) => {
                let (ty, val) = self.visit_short_circuit(left, right, true);
                expr.ty = Some(ty);
                expr.ir_value = Some(val);
            }
            ExprKind::Or(left, right) => {
                let (ty, val) = self.visit_short_circuit(left, right, false);
                expr.ty = Some(ty);
                expr.ir_value = Some(val);
            }
            ExprKind::Cast { target, expr: inner } => {
                self.visit_expr(inner);
                let from = inner.ty.expect("inner expr always has a type after visiting");
                let v = inner.ir_value.clone().expect("inner expr always has an ir_value");
                let target = *target;
                let result = match (from, target) {
                    (Type::Byte, Type::Int) => self.zext(&v),
                    (Type::Int, Type::Byte) => self.trunc(&v),
                    (a, b) if a == b => v,
                    _ => self.handler.mismatch(line),
                };
                expr.ty = Some(target);
                expr.ir_value = Some(result);
            }
            ExprKind::Call { func, args } => {
                let func = *func;
                let (ty, val) = self.visit_call(func, args, line);
                expr.ty = Some(ty);
                expr.ir_value = val;
            }
        }
    }

    /// Evaluates `left`, branches on it, and evaluates `right` only on the
    /// path where it can affect the result — `And` skips `right` when
    /// `left` is false, `Or` skips it when `left` is true. The result is
    /// materialised through a stack slot so both paths converge on one SSA
    /// value.
    fn visit_short_circuit(&mut self, left: &mut Expr, right: &mut Expr, is_and: bool) -> (Type, String) {
        self.visit_expr(left);
        if left.ty != Some(Type::Bool) {
            self.handler.mismatch(left.line);
        }
        let lval = left.ir_value.clone().expect("Bool expr always has an ir_value");

        let slot = self.buffer.fresh_var();
        self.buffer.emit(format!("{slot} = alloca i1"));

        let rhs_label = self.buffer.fresh_label();
        let shortcut_label = self.buffer.fresh_label();
        let end_label = self.buffer.fresh_label();
        if is_and {
            self.buffer
                .emit(format!("br i1 {lval}, label {rhs_label}, label {shortcut_label}"));
        } else {
            self.buffer
                .emit(format!("br i1 {lval}, label {shortcut_label}, label {rhs_label}"));
        }

        self.buffer.emit_label(&rhs_label);
        self.visit_expr(right);
        if right.ty != Some(Type::Bool) {
            self.handler.mismatch(right.line);
        }
        let rval = right.ir_value.clone().expect("Bool expr always has an ir_value");
        let combined = self.buffer.fresh_var();
        let opname = if is_and { "and" } else { "or" };
        self.buffer.emit(format!("{combined} = {opname} i1 {lval}, {rval}"));
        self.buffer.emit(format!("store i1 {combined}, i1* {slot}"));
        self.buffer.emit(format!("br label {end_label}"));

        self.buffer.emit_label(&shortcut_label);
        let shortcut_const = if is_and { 0 } else { 1 };
        self.buffer.emit(format!("store i1 {shortcut_const}, i1* {slot}"));
        self.buffer.emit(format!("br label {end_label}"));

        self.buffer.emit_label(&end_label);
        let result = self.buffer.fresh_var();
        self.buffer.emit(format!("{result} = load i1, i1* {slot}"));
        (Type::Bool, result)
    }

    /// Resolves and emits a call. `print`/`printi` are the two built-ins
    /// with bespoke lowering (a `printf` call against a fixed format
    /// string); every other name goes through ordinary function-call
    /// lowering against its declared signature.
    fn visit_call(&mut self, func: Symbol, args: &mut [Expr], line: u32) -> (Type, Option<String>) {
        for arg in args.iter_mut() {
            self.visit_expr(arg);
        }

        if func == Symbol::intern("print") {
            if args.len() != 1 || args[0].ty != Some(Type::String) {
                self.handler
                    .prototype_mismatch(func, vec![Type::String.as_upper_str().to_string()], line);
            }
            let text = args[0].ir_value.clone().expect("String expr always has an ir_value");
            let len = text.len() + 1;
            let global = self.buffer.emit_string(&text);
            let ptr = self.buffer.fresh_var();
            self.buffer.emit(format!(
                "{ptr} = getelementptr inbounds [{len} x i8], [{len} x i8]* {global}, i32 0, i32 0"
            ));
            let result = self.buffer.fresh_var();
            self.buffer.emit(format!(
                "{result} = call i32 (i8*, ...) @printf(i8* getelementptr inbounds ([4 x i8], [4 x i8]* @.str_specifier, i32 0, i32 0), i8* {ptr})"
            ));
            return (Type::Void, None);
        }

        if func == Symbol::intern("printi") {
            if args.len() != 1 {
                self.handler
                    .prototype_mismatch(func, vec![Type::Int.as_upper_str().to_string()], line);
            }
            let val = match args[0].ty {
                Some(Type::Int) => args[0].ir_value.clone().expect("Int expr always has an ir_value"),
                Some(Type::Byte) => {
                    let v = args[0].ir_value.clone().expect("Byte expr always has an ir_value");
                    self.zext(&v)
                }
                _ => self
                    .handler
                    .prototype_mismatch(func, vec![Type::Int.as_upper_str().to_string()], line),
            };
            let result = self.buffer.fresh_var();
            self.buffer.emit(format!(
                "{result} = call i32 (i8*, ...) @printf(i8* getelementptr inbounds ([4 x i8], [4 x i8]* @.int_specifier, i32 0, i32 0), i32 {val})"
            ));
            return (Type::Void, None);
        }

        let binding = match self.tables.get_symbol(func).cloned() {
            Some(b) if b.is_function() => b,
            Some(_) => self.handler.def_as_var(func, line),
            None => self.handler.undef_func(func, line),
        };
        let (return_type, formals) = match binding.kind {
            BindingKind::Function { return_type, formals } => (return_type, formals),
            BindingKind::Variable { .. } => unreachable!("checked is_function above"),
        };
        if formals.len() != args.len() {
            let expected = formals.iter().map(|t| t.as_upper_str().to_string()).collect();
            self.handler.prototype_mismatch(func, expected, line);
        }
        let arg_strs: Vec<String> = formals
            .iter()
            .zip(args.iter())
            .map(|(formal_ty, arg)| {
                let val = self.coerce_call_arg(*formal_ty, arg, line);
                format!("{} {val}", llvm_type(*formal_ty))
            })
            .collect();
        let sig = arg_strs.join(", ");
        if return_type == Type::Void {
            self.buffer.emit(format!("call void @{func}({sig})"));
            (Type::Void, None)
        } else {
            let result = self.buffer.fresh_var();
            self.buffer
                .emit(format!("{result} = call {} @{func}({sig})", llvm_type(return_type)));
            (return_type, Some(result))
        }
    }

    /// Unifies two numeric operand types for `BinOp`/`RelOp`: same-type
    /// pairs pass through unchanged, a mixed `INT`/`BYTE` pair widens the
    /// `BYTE` side to `INT`. Anything else (including a non-numeric
    /// operand) is a `Mismatch`.
    fn widen_pair(&mut self, left: &Expr, right: &Expr, line: u32) -> (Type, String, String) {
        let lval = left.ir_value.clone().expect("operand always has an ir_value");
        let rval = right.ir_value.clone().expect("operand always has an ir_value");
        match (left.ty, right.ty) {
            (Some(Type::Int), Some(Type::Int)) => (Type::Int, lval, rval),
            (Some(Type::Byte), Some(Type::Byte)) => (Type::Byte, lval, rval),
            (Some(Type::Int), Some(Type::Byte)) => {
                let rval = self.zext(&rval);
                (Type::Int, lval, rval)
            }
            (Some(Type::Byte), Some(Type::Int)) => {
                let lval = self.zext(&lval);
                (Type::Int, lval, rval)
            }
            _ => self.handler.mismatch(line),
        }
    }

    /// Rejects a bare function name used where a value is expected — a
    /// `VarDecl` initialiser or an `Assign` RHS that names a declared
    /// function rather than a variable. `visit_expr`'s `Id` case happily
    /// resolves a function-kind binding (for a direct `Call`'s callee), so
    /// this guard has to run after the fact on the cases that don't want one.
    fn reject_function_name(&self, expr: &Expr, line: u32) {
        if let ExprKind::Id(sym) = &expr.kind {
            if matches!(self.tables.get_symbol(*sym), Some(b) if b.is_function()) {
                self.handler.def_as_func(*sym, line);
            }
        }
    }

    /// Coerces `arg` to `target`, allowing only the implicit `BYTE→INT`
    /// widening — used by `VarDecl`/`Assign`/`Return`, where a declared or
    /// required type must match exactly modulo that one widening.
    fn widen_only(&mut self, target: Type, arg: &Expr, line: u32) -> String {
        let val = arg.ir_value.clone().expect("operand always has an ir_value");
        match (arg.ty, target) {
            (Some(t), target) if t == target => val,
            (Some(Type::Byte), Type::Int) => self.zext(&val),
            _ => self.handler.mismatch(line),
        }
    }

    /// Coerces a call argument to its formal's type. Identical to
    /// `widen_only` except it additionally permits `INT→BYTE` via an
    /// unconditional `trunc` — a deliberately lenient rule for a
    /// `BYTE`-typed formal fed an `INT` actual, kept rather than tightened
    /// to require an explicit cast (see DESIGN.md).
    fn coerce_call_arg(&mut self, target: Type, arg: &Expr, line: u32) -> String {
        let val = arg.ir_value.clone().expect("operand always has an ir_value");
        match (arg.ty, target) {
            (Some(t), target) if t == target => val,
            (Some(Type::Byte), Type::Int) => self.zext(&val),
            (Some(Type::Int), Type::Byte) => self.trunc(&val),
            _ => self.handler.mismatch(line),
        }
    }

    fn zext(&mut self, val: &str) -> String {
        let reg = self.buffer.fresh_var();
        self.buffer.emit(format!("{reg} = zext i8 {val} to i32"));
        reg
    }

    fn trunc(&mut self, val: &str) -> String {
        let reg = self.buffer.fresh_var();
        self.buffer.emit(format!("{reg} = trunc i32 {val} to i8"));
        reg
    }
}

fn trailing_return(return_type: Type) -> String {
    match return_type {
        Type::Int | Type::Byte => format!("ret {} 0", llvm_type(return_type)),
        Type::Bool => "ret i1 0".to_string(),
        Type::String => "ret i8* null".to_string(),
        Type::Void => "ret void".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tinyc_par::Parser;

    fn compile(source: &str) -> String {
        let handler = Handler::with_color(false);
        let mut program = Parser::new(source, &handler).parse_program();
        let mut visitor = Visitor::new(&handler);
        visitor.visit_program(&mut program);
        visitor.into_buffer().render()
    }

    #[test]
    fn declares_and_prints_an_int_local() {
        let ir = compile("void main(){ int x=5; printi(x); }");
        assert!(ir.contains("alloca i32"));
        assert!(ir.contains("store i32 5"));
        assert!(ir.contains("load i32"));
        assert!(ir.contains("call i32 (i8*, ...) @printf"));
    }

    #[test]
    fn if_else_shares_one_end_label() {
        let ir = compile(
            "void main(){ int a=0; int b=1; if (a<b) { printi(a); } else { printi(b); } }",
        );
        assert!(ir.contains("icmp slt"));
        let branches: Vec<&str> = ir.matches("br i1").collect();
        assert_eq!(branches.len(), 1);
        // Both arms should jump to the same end label.
        let end_jumps: Vec<&str> = ir.matches("br label").collect();
        assert!(end_jumps.len() >= 2);
    }

    #[test]
    fn division_emits_a_zero_check_and_sdiv() {
        let ir = compile("void main(){ int a = 1 / 0; }");
        assert!(ir.contains("icmp eq i32"));
        assert!(ir.contains("@.div_zero_msg"));
        assert!(ir.contains("sdiv i32"));
    }

    #[test]
    fn byte_and_int_mix_widens_the_byte_operand() {
        let ir = compile("void main(){ byte b = 3b; int x = b + 1; printi(x); }");
        assert!(ir.contains("zext i8"));
        assert!(ir.contains("add i32"));
    }

    #[test]
    fn and_short_circuits_through_a_stack_slot() {
        let ir = compile("void main(){ bool t = true; bool f = false; bool r = t && f; }");
        assert!(ir.contains("alloca i1"));
        assert!(ir.contains("and i1"));
    }

    #[test]
    fn while_loop_reuses_condition_and_end_labels_for_continue_and_break() {
        let ir = compile(
            "void main(){ int i=0; while (i<10) { i = i + 1; if (i==5) { continue; } if (i==9) { break; } } }",
        );
        assert!(ir.contains("icmp slt"));
        assert!(ir.contains("icmp eq"));
    }

    #[test]
    fn printi_widens_a_byte_argument_before_printing() {
        let ir = compile("void main(){ byte b = 3b; printi(b); }");
        assert!(ir.contains("zext i8"));
        assert!(ir.contains("@.int_specifier"));
    }

    #[test]
    fn print_interns_the_string_and_calls_printf() {
        let ir = compile("void main(){ print(\"hi\"); }");
        assert!(ir.contains("@str0 = constant [3 x i8]"));
        assert!(ir.contains("@.str_specifier"));
    }

    #[test]
    fn user_function_call_lowers_to_a_direct_call_instruction() {
        let ir = compile("int square(int n){ return n * n; } void main(){ int r = square(4); printi(r); }");
        assert!(ir.contains("define i32 @square(i32 %arg1)"));
        assert!(ir.contains("call i32 @square"));
    }

    #[test]
    fn formal_fed_by_call_site_actual_is_loaded_through_its_alloca_slot() {
        // Every use of a formal parameter inside the body goes through the
        // same load/alloca path as a local, once the prologue has rebound
        // its emitted_name away from the bare %argN register.
        let ir = compile("void show(int n){ printi(n); } void main(){ show(1); }");
        assert!(ir.contains("%arg1"));
        assert!(ir.contains("alloca i32"));
        assert!(ir.contains("store i32 %arg1"));
    }
}
